//! Outbound chat operations, independent of the Telegram client.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use linkgrab_core::Keyboard;
use linkgrab_media::DeliveryKind;
use tokio::sync::mpsc;

/// A message the bot has sent and may later edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

/// Bytes handed to the transport so far, out of `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent: u64,
    pub total: u64,
}

pub type ProgressSender = mpsc::UnboundedSender<UploadProgress>;

/// A local file to send as video or document.
#[derive(Debug)]
pub struct MediaUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: DeliveryKind,
    pub caption: String,
    pub size: u64,
    pub progress: Option<ProgressSender>,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<MessageRef>;

    async fn edit_text(&self, message: MessageRef, text: &str, keyboard: Option<&Keyboard>) -> Result<()>;

    async fn delete(&self, message: MessageRef) -> Result<()>;

    async fn send_media(&self, chat_id: i64, upload: MediaUpload) -> Result<()>;

    async fn typing(&self, chat_id: i64) -> Result<()>;

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>, alert: bool) -> Result<()>;
}
