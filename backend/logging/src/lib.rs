//! Structured logging for linkgrab.
//!
//! Console and rolling NDJSON output, secret redaction, and per-request
//! lifecycle events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{RequestEvent, RequestEventEntry, RequestEventLogger};
pub use logger::init_logger;
pub use redact::{redact_sensitive_data, redact_url};
