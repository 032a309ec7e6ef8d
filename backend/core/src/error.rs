use thiserror::Error;

/// Top-level error type shared across the linkgrab crates.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("storage error: {0}")]
    Storage(String),
}
