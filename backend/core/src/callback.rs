//! Inline-button callback payloads.
//!
//! Language buttons carry `lang_<code>`; YouTube format buttons carry
//! `yt_video|<messageId>` or `yt_audio|<messageId>`.

use crate::types::MediaKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Language selection with the raw locale code (validated by the store).
    Language(String),
    /// YouTube format choice for the prompt message with the given id.
    YoutubeFormat { kind: MediaKind, message_id: i32 },
}

impl CallbackPayload {
    pub fn parse(data: &str) -> Option<Self> {
        if let Some(code) = data.strip_prefix("lang_") {
            if code.is_empty() {
                return None;
            }
            return Some(Self::Language(code.to_string()));
        }

        let (tag, id) = data.split_once('|')?;
        let kind = match tag {
            "yt_video" => MediaKind::Video,
            "yt_audio" => MediaKind::Audio,
            _ => return None,
        };
        let message_id = id.parse().ok()?;
        Some(Self::YoutubeFormat { kind, message_id })
    }

    pub fn encode(&self) -> String {
        match self {
            Self::Language(code) => format!("lang_{code}"),
            Self::YoutubeFormat { kind: MediaKind::Video, message_id } => {
                format!("yt_video|{message_id}")
            }
            Self::YoutubeFormat { kind: MediaKind::Audio, message_id } => {
                format!("yt_audio|{message_id}")
            }
        }
    }
}
