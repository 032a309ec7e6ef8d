use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use linkgrab_commands::RateLimit;
use linkgrab_config::{resolve_path, LinkgrabConfig};
use linkgrab_infra::GistSettings;
use linkgrab_media::DownloadSettings;

/// Runtime settings resolved from a prepared config: paths made absolute,
/// seconds turned into durations, optional sections collapsed.
#[derive(Debug, Clone)]
pub struct Settings {
    pub token: String,
    pub api_url: Option<String>,
    pub admins: Vec<i64>,
    pub yt_dlp: PathBuf,
    pub downloads: DownloadSettings,
    pub metadata_timeout: Duration,
    pub max_upload_bytes: u64,
    pub language_file: PathBuf,
    pub stats_file: PathBuf,
    pub gist: Option<GistSettings>,
    pub command_limit: RateLimit,
    pub admin_utc_offset_hours: i32,
    pub promo_channels: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Expects a config that went through `load_and_prepare`.
    pub fn from_config(config: &LinkgrabConfig, config_dir: &Path) -> Result<Self> {
        let token = config
            .bot_token()
            .ok_or_else(|| anyhow!("telegram.token is not set (or TELEGRAM_BOT_TOKEN)"))?
            .to_string();

        let downloads = config.downloads.clone().unwrap_or_default();
        let storage = config.storage.clone().unwrap_or_default();
        let limit = config.rate_limit.clone().unwrap_or_default();
        let notifications = config.notifications.clone().unwrap_or_default();
        let logging = config.logging.clone().unwrap_or_default();
        let defaults = DownloadSettings::default();

        let gist = config.gist_token().map(|token| {
            let section = config.gist.clone().unwrap_or_default();
            GistSettings {
                token: token.to_string(),
                gist_id: section.gist_id.filter(|id| !id.is_empty()),
                file_name: section
                    .file_name
                    .unwrap_or_else(|| linkgrab_config::defaults::DEFAULT_GIST_FILE_NAME.to_string()),
            }
        });

        Ok(Self {
            token,
            api_url: config.telegram.as_ref().and_then(|t| t.api_url.clone()),
            admins: config.admins.clone(),
            yt_dlp: PathBuf::from(downloads.yt_dlp_path.as_deref().unwrap_or("yt-dlp")),
            downloads: DownloadSettings {
                temp_dir: downloads
                    .temp_dir
                    .as_deref()
                    .map(|p| resolve_path(config_dir, p))
                    .unwrap_or(defaults.temp_dir),
                attempt_timeout: downloads
                    .attempt_timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.attempt_timeout),
                strategy_delay: downloads
                    .strategy_delay_secs
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.strategy_delay),
                instagram_cookies: downloads
                    .instagram_cookies
                    .as_deref()
                    .map(|p| resolve_path(config_dir, p)),
            },
            metadata_timeout: Duration::from_secs(
                downloads
                    .metadata_timeout_secs
                    .unwrap_or(linkgrab_config::defaults::DEFAULT_METADATA_TIMEOUT_SECS),
            ),
            max_upload_bytes: downloads
                .max_upload_bytes
                .unwrap_or(linkgrab_config::defaults::DEFAULT_MAX_UPLOAD_BYTES),
            language_file: resolve_path(
                config_dir,
                storage
                    .language_file
                    .as_deref()
                    .unwrap_or(linkgrab_config::defaults::DEFAULT_LANGUAGE_FILE),
            ),
            stats_file: resolve_path(
                config_dir,
                storage
                    .stats_file
                    .as_deref()
                    .unwrap_or(linkgrab_config::defaults::DEFAULT_STATS_FILE),
            ),
            gist,
            command_limit: RateLimit {
                max_requests: limit
                    .max_requests
                    .unwrap_or(linkgrab_config::defaults::DEFAULT_RATE_LIMIT_MAX),
                window: Duration::from_secs(
                    limit
                        .window_secs
                        .unwrap_or(linkgrab_config::defaults::DEFAULT_RATE_LIMIT_WINDOW_SECS),
                ),
            },
            admin_utc_offset_hours: notifications
                .admin_utc_offset_hours
                .unwrap_or(linkgrab_config::defaults::DEFAULT_ADMIN_UTC_OFFSET_HOURS),
            promo_channels: notifications.promo_channels.unwrap_or_default(),
            log_level: logging
                .level
                .unwrap_or_else(|| linkgrab_config::defaults::DEFAULT_LOG_LEVEL.to_string()),
            log_dir: logging.dir.as_deref().map(|p| resolve_path(config_dir, p)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgrab_config::apply_all_defaults;
    use linkgrab_config::schema::{DownloadsConfig, GistConfig, TelegramConfig};

    fn config() -> LinkgrabConfig {
        let mut cfg = LinkgrabConfig::default();
        cfg.telegram = Some(TelegramConfig { token: Some("1:abc".into()), api_url: None });
        cfg.admins = vec![4, 5];
        cfg
    }

    #[test]
    fn resolves_paths_against_config_dir() {
        let mut cfg = config();
        cfg.downloads = Some(DownloadsConfig {
            instagram_cookies: Some("ig.txt".into()),
            strategy_delay_secs: Some(0),
            ..Default::default()
        });
        let settings = Settings::from_config(&apply_all_defaults(cfg), Path::new("/etc/linkgrab")).unwrap();

        assert_eq!(settings.stats_file, PathBuf::from("/etc/linkgrab/bot_stats.json"));
        assert_eq!(settings.language_file, PathBuf::from("/etc/linkgrab/user_languages.json"));
        assert_eq!(settings.downloads.instagram_cookies, Some(PathBuf::from("/etc/linkgrab/ig.txt")));
        assert_eq!(settings.downloads.strategy_delay, Duration::ZERO);
        assert_eq!(settings.downloads.attempt_timeout, Duration::from_secs(300));
        assert_eq!(settings.command_limit, RateLimit::new(10, 60));
        assert!(settings.gist.is_none());
    }

    #[test]
    fn gist_enabled_by_token() {
        let mut cfg = config();
        cfg.gist = Some(GistConfig { token: Some("ghp_x".into()), gist_id: Some(String::new()), file_name: None });
        let settings = Settings::from_config(&apply_all_defaults(cfg), Path::new("/tmp")).unwrap();
        let gist = settings.gist.unwrap();
        assert_eq!(gist.token, "ghp_x");
        assert!(gist.gist_id.is_none());
        assert_eq!(gist.file_name, "bot_stats.json");
    }

    #[test]
    fn missing_token_fails() {
        let err = Settings::from_config(&LinkgrabConfig::default(), Path::new("/tmp")).unwrap_err();
        assert!(err.to_string().contains("telegram.token"));
    }
}
