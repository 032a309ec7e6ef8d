//! Config defaults: fills every unset value so the rest of the bot can read
//! the config without fallbacks of its own.

use crate::schema::{
    DownloadsConfig, GistConfig, LinkgrabConfig, LoggingConfig, NotificationsConfig,
    RateLimitConfig, StorageConfig,
};

pub const DEFAULT_YT_DLP_PATH: &str = "yt-dlp";

pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_STRATEGY_DELAY_SECS: u64 = 2;

pub const DEFAULT_METADATA_TIMEOUT_SECS: u64 = 30;

/// Telegram's upload ceiling for bots on the public API.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const DEFAULT_LANGUAGE_FILE: &str = "user_languages.json";

pub const DEFAULT_STATS_FILE: &str = "bot_stats.json";

pub const DEFAULT_GIST_FILE_NAME: &str = "bot_stats.json";

pub const DEFAULT_RATE_LIMIT_MAX: usize = 10;

pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 60;

pub const DEFAULT_ADMIN_UTC_OFFSET_HOURS: i32 = 4;

pub const DEFAULT_PROMO_CHANNELS: &str = "@silgiuserbots | @silgiub | @silgiuserbotchat";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: LinkgrabConfig) -> LinkgrabConfig {
    let config = apply_download_defaults(config);
    let config = apply_storage_defaults(config);
    let config = apply_gist_defaults(config);
    let config = apply_rate_limit_defaults(config);
    let config = apply_notification_defaults(config);
    apply_logging_defaults(config)
}

fn apply_download_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let downloads = config.downloads.get_or_insert_with(DownloadsConfig::default);
    downloads.yt_dlp_path.get_or_insert_with(|| DEFAULT_YT_DLP_PATH.to_string());
    downloads.temp_dir.get_or_insert_with(|| {
        std::env::temp_dir().join("linkgrab").to_string_lossy().into_owned()
    });
    downloads.attempt_timeout_secs.get_or_insert(DEFAULT_ATTEMPT_TIMEOUT_SECS);
    downloads.strategy_delay_secs.get_or_insert(DEFAULT_STRATEGY_DELAY_SECS);
    downloads.metadata_timeout_secs.get_or_insert(DEFAULT_METADATA_TIMEOUT_SECS);
    downloads.max_upload_bytes.get_or_insert(DEFAULT_MAX_UPLOAD_BYTES);
    config
}

fn apply_storage_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let storage = config.storage.get_or_insert_with(StorageConfig::default);
    storage.language_file.get_or_insert_with(|| DEFAULT_LANGUAGE_FILE.to_string());
    storage.stats_file.get_or_insert_with(|| DEFAULT_STATS_FILE.to_string());
    config
}

/// Only the file name gets a default; the mirror stays off without a token.
fn apply_gist_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let gist = config.gist.get_or_insert_with(GistConfig::default);
    gist.file_name.get_or_insert_with(|| DEFAULT_GIST_FILE_NAME.to_string());
    config
}

fn apply_rate_limit_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let limit = config.rate_limit.get_or_insert_with(RateLimitConfig::default);
    limit.max_requests.get_or_insert(DEFAULT_RATE_LIMIT_MAX);
    limit.window_secs.get_or_insert(DEFAULT_RATE_LIMIT_WINDOW_SECS);
    config
}

fn apply_notification_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let notifications = config.notifications.get_or_insert_with(NotificationsConfig::default);
    notifications.admin_utc_offset_hours.get_or_insert(DEFAULT_ADMIN_UTC_OFFSET_HOURS);
    notifications
        .promo_channels
        .get_or_insert_with(|| DEFAULT_PROMO_CHANNELS.to_string());
    config
}

fn apply_logging_defaults(mut config: LinkgrabConfig) -> LinkgrabConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    logging.level.get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());
    config
}
