use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::platform::Platform;

/// Which rendition of the media the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

/// Identity of a chat user as seen by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl UserRef {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            username: None,
            first_name: first_name.into(),
            last_name: None,
        }
    }

    /// `@username`, or a placeholder when the account has none.
    pub fn handle(&self) -> String {
        match &self.username {
            Some(name) if !name.is_empty() => format!("@{name}"),
            _ => "No username".to_string(),
        }
    }

    /// First and last name joined, trimmed.
    pub fn full_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", self.first_name, last).trim().to_string()
    }
}

/// One user-initiated download. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub id: Uuid,
    pub user: UserRef,
    pub chat_id: i64,
    pub url: String,
    pub platform: Platform,
    pub media_kind: MediaKind,
    pub created_at: DateTime<Utc>,
}

impl DownloadRequest {
    pub fn new(user: UserRef, chat_id: i64, url: impl Into<String>, platform: Platform) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            chat_id,
            url: url.into(),
            platform,
            media_kind: MediaKind::Video,
            created_at: Utc::now(),
        }
    }

    pub fn with_media_kind(mut self, kind: MediaKind) -> Self {
        self.media_kind = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_falls_back_without_username() {
        let mut user = UserRef::new(7, "Aysel");
        assert_eq!(user.handle(), "No username");
        user.username = Some("aysel".into());
        assert_eq!(user.handle(), "@aysel");
    }

    #[test]
    fn full_name_trims_missing_last_name() {
        let mut user = UserRef::new(7, "Aysel");
        assert_eq!(user.full_name(), "Aysel");
        user.last_name = Some("Mammadova".into());
        assert_eq!(user.full_name(), "Aysel Mammadova");
    }

    #[test]
    fn requests_default_to_video() {
        let req = DownloadRequest::new(UserRef::new(1, "a"), 1, "https://youtu.be/x", Platform::YouTube);
        assert_eq!(req.media_kind, MediaKind::Video);
        let req = req.with_media_kind(MediaKind::Audio);
        assert_eq!(req.media_kind, MediaKind::Audio);
    }
}
