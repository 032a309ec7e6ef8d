//! Config validation: everything that would make the bot fail at runtime is
//! an error, everything that only disables a feature is a warning.

use thiserror::Error;

use crate::schema::LinkgrabConfig;

/// A config validation finding with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

/// Validate a config that already went through `apply_all_defaults`.
pub fn validate(config: &LinkgrabConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_telegram(config, &mut report);
    validate_admins(config, &mut report);
    validate_downloads(config, &mut report);
    validate_rate_limit(config, &mut report);
    validate_notifications(config, &mut report);
    validate_logging(config, &mut report);
    report
}

fn validate_telegram(config: &LinkgrabConfig, report: &mut ValidationReport) {
    match config.bot_token() {
        None => report.error("telegram.token", "Telegram bot token is required"),
        Some(token) if !token.contains(':') => {
            report.error("telegram.token", "Bot token must look like <id>:<secret>")
        }
        Some(_) => {}
    }
    if let Some(url) = config.telegram.as_ref().and_then(|t| t.api_url.as_deref()) {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            report.error("telegram.apiUrl", format!("'{url}' is not an http(s) URL"));
        }
    }
}

fn validate_admins(config: &LinkgrabConfig, report: &mut ValidationReport) {
    if config.admins.is_empty() {
        report.warn("admins", "No admins configured; admin commands and notices are disabled");
    }
    if config.admins.iter().any(|id| *id <= 0) {
        report.error("admins", "Admin ids must be positive Telegram user ids");
    }
}

fn validate_downloads(config: &LinkgrabConfig, report: &mut ValidationReport) {
    let Some(downloads) = &config.downloads else { return };

    for (path, value) in [
        ("downloads.attemptTimeoutSecs", downloads.attempt_timeout_secs),
        ("downloads.metadataTimeoutSecs", downloads.metadata_timeout_secs),
    ] {
        if value == Some(0) {
            report.error(path, "Timeout must be at least one second");
        }
    }
    if downloads.max_upload_bytes == Some(0) {
        report.error("downloads.maxUploadBytes", "maxUploadBytes must be > 0");
    }
    if downloads.yt_dlp_path.as_deref().map(str::trim).unwrap_or("").is_empty() {
        report.error("downloads.ytDlpPath", "Path to the yt-dlp binary is required");
    }

    match downloads.instagram_cookies.as_deref() {
        None => report.warn(
            "downloads.instagramCookies",
            "No Instagram cookie file configured; Instagram links will fail",
        ),
        Some(path) if !std::path::Path::new(path).is_file() => report.warn(
            "downloads.instagramCookies",
            format!("Cookie file {path} does not exist; Instagram links will fail"),
        ),
        Some(_) => {}
    }
}

fn validate_rate_limit(config: &LinkgrabConfig, report: &mut ValidationReport) {
    let Some(limit) = &config.rate_limit else { return };
    if limit.max_requests == Some(0) {
        report.error("rateLimit.maxRequests", "maxRequests must be >= 1");
    }
    if limit.window_secs == Some(0) {
        report.error("rateLimit.windowSecs", "windowSecs must be >= 1");
    }
}

fn validate_notifications(config: &LinkgrabConfig, report: &mut ValidationReport) {
    let Some(notifications) = &config.notifications else { return };
    if let Some(offset) = notifications.admin_utc_offset_hours {
        if !(-12..=14).contains(&offset) {
            report.error(
                "notifications.adminUtcOffsetHours",
                format!("UTC offset {offset} is outside -12..=14"),
            );
        }
    }
}

fn validate_logging(config: &LinkgrabConfig, report: &mut ValidationReport) {
    let Some(level) = config.logging.as_ref().and_then(|l| l.level.as_deref()) else { return };
    if !matches!(
        level.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        report.warn("logging.level", format!("Unknown level '{level}', RUST_LOG syntax assumed"));
    }
}
