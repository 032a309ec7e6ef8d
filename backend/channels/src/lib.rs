//! Chat side of the bot: inbound routing, the per-request lifecycle and
//! delivery back to Telegram.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub mod caption;
pub mod coordinator;
pub mod notify;
pub mod pending;
pub mod pipeline;
pub mod progress;
pub mod router;
pub mod status;
pub mod telegram;
pub mod transport;

#[cfg(test)]
mod testing;

pub use coordinator::{CoordinatorDeps, LinkCoordinator, DEFAULT_MAX_UPLOAD_BYTES};
pub use notify::AdminNotifier;
pub use pending::{PendingSelections, SELECTION_TTL};
pub use pipeline::UploadPipeline;
pub use router::{InboundCallback, InboundRouter, InboundText, RouterDeps};
pub use telegram::{build_bot, TelegramAdapter, TelegramTransport};
pub use transport::{ChatTransport, MediaUpload, MessageRef, UploadProgress};

/// A source of inbound chat updates.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Feed updates to `router` until `shutdown` fires.
    async fn start(&self, router: Arc<InboundRouter>, shutdown: CancellationToken) -> anyhow::Result<()>;
}
