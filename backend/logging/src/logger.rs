//! Structured Logger
//!
//! Wraps `tracing` to provide a console layer plus an optional JSON file
//! layer (daily rotation), with `RUST_LOG` taking precedence over the
//! configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global logger. Without a log directory only the console
/// layer is installed.
pub fn init_logger(log_dir: Option<&Path>, level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // Rolling file appender: writes NDJSON to `<dir>/linkgrab.log.YYYY-MM-DD`
    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "linkgrab.log");
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
    });

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
