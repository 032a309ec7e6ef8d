//! linkgrab runtime configuration schema.
//!
//! Every field is optional on disk; `apply_all_defaults` fills the gaps and
//! the typed accessors below read the filled values.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkgrabConfig {
    /// Bot credentials and API endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<TelegramConfig>,

    /// Telegram user ids with admin rights; the first one receives notices
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admins: Vec<i64>,

    /// Extraction tool and download behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<DownloadsConfig>,

    /// Local persistence files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageConfig>,

    /// Optional GitHub gist mirror for usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gist: Option<GistConfig>,

    /// Allowance for rate-limited commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,

    /// Admin notices and caption footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationsConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Self-hosted Bot API server, e.g. for uploads above the public limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yt_dlp_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<String>,
    /// Netscape cookie file; Instagram downloads fail without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_cookies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_delay_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsConfig {
    /// Offset applied to timestamps in admin notices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_utc_offset_hours: Option<i32>,
    /// Channel line appended to every caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_channels: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling JSON log; console only when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl LinkgrabConfig {
    pub fn bot_token(&self) -> Option<&str> {
        self.telegram
            .as_ref()
            .and_then(|t| t.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Where admin notices go.
    pub fn notification_target(&self) -> Option<i64> {
        self.admins.first().copied()
    }

    /// Gist mirroring is on when a token is present; the id may be
    /// discovered at startup.
    pub fn gist_token(&self) -> Option<&str> {
        self.gist
            .as_ref()
            .and_then(|g| g.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}
