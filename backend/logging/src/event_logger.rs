//! Request Event Logger
//!
//! One structured event per lifecycle transition of a download request,
//! emitted under the `request_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::redact::{redact_sensitive_data, redact_url};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequestEvent {
    Received { user_id: i64, chat_id: i64, url: String },
    Classified { platform: String },
    AwaitingFormat,
    StrategyFailed { strategy: String, error: String },
    Extracted { strategy: String, attempts: usize, bytes: u64 },
    Delivered { bytes: u64 },
    Failed { reason: String },
    Abandoned,
}

#[derive(Debug, Serialize)]
pub struct RequestEventEntry {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: RequestEvent,
}

pub struct RequestEventLogger;

impl RequestEventLogger {
    /// Logs a request event, scrubbing URLs and error text first.
    pub fn log(request_id: Uuid, mut event: RequestEvent) {
        match &mut event {
            RequestEvent::Received { url, .. } => *url = redact_url(url),
            RequestEvent::StrategyFailed { error, .. } => *error = redact_sensitive_data(error),
            RequestEvent::Failed { reason } => *reason = redact_sensitive_data(reason),
            _ => {}
        }

        let entry = RequestEventEntry {
            request_id,
            timestamp: Utc::now(),
            event,
        };

        match serde_json::to_string(&entry.event) {
            Ok(json) => info!(target: "request_events", request_id = %entry.request_id, event = %json, "Request event"),
            Err(_) => info!(target: "request_events", event = ?entry, "Request event"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(RequestEvent::Extracted {
            strategy: "ios".into(),
            attempts: 3,
            bytes: 10,
        })
        .unwrap();
        assert_eq!(json["type"], "extracted");
        assert_eq!(json["attempts"], 3);
    }

    #[test]
    fn logging_without_subscriber_is_harmless() {
        RequestEventLogger::log(Uuid::new_v4(), RequestEvent::Received {
            user_id: 1,
            chat_id: 1,
            url: "https://youtu.be/x?si=abc".into(),
        });
    }
}
