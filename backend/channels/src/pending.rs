//! YouTube requests waiting for the user's video/audio choice.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use linkgrab_core::DownloadRequest;
use tokio::sync::Mutex;
use tracing::debug;

use crate::transport::MessageRef;

/// Entries older than this are dropped.
pub const SELECTION_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct PendingSelection {
    pub request: DownloadRequest,
    /// The message holding the format keyboard.
    pub prompt: MessageRef,
    created: Instant,
}

/// Keyed by (chat id, originating message id).
pub struct PendingSelections {
    ttl: Duration,
    entries: Mutex<HashMap<(i64, i32), PendingSelection>>,
}

impl PendingSelections {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Store a selection, sweeping expired ones first.
    pub async fn insert(&self, origin: MessageRef, request: DownloadRequest, prompt: MessageRef) {
        let mut entries = self.entries.lock().await;
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, e| e.created.elapsed() < ttl);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(swept, "Expired format selections removed");
        }
        entries.insert(
            (origin.chat_id, origin.message_id),
            PendingSelection { request, prompt, created: Instant::now() },
        );
    }

    /// Remove and return the selection if it exists, is fresh, and belongs
    /// to `user_id`. Someone else's tap leaves it in place.
    pub async fn take(&self, chat_id: i64, message_id: i32, user_id: i64) -> Option<PendingSelection> {
        let mut entries = self.entries.lock().await;
        let key = (chat_id, message_id);
        let state = entries
            .get(&key)
            .map(|e| (e.created.elapsed() >= self.ttl, e.request.user.id == user_id));
        match state {
            Some((true, _)) => {
                entries.remove(&key);
                None
            }
            Some((false, true)) => entries.remove(&key),
            _ => None,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for PendingSelections {
    fn default() -> Self {
        Self::new(SELECTION_TTL)
    }
}
