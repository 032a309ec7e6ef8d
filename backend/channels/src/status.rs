//! The single status message a request keeps overwriting.

use std::sync::Arc;

use linkgrab_core::Keyboard;
use tracing::{debug, warn};

use crate::transport::{ChatTransport, MessageRef};

pub struct StatusMessage {
    transport: Arc<dyn ChatTransport>,
    chat_id: i64,
    current: Option<MessageRef>,
}

impl StatusMessage {
    pub fn new(transport: Arc<dyn ChatTransport>, chat_id: i64) -> Self {
        Self { transport, chat_id, current: None }
    }

    /// Continue from a message the bot already sent.
    pub fn adopt(transport: Arc<dyn ChatTransport>, message: MessageRef) -> Self {
        Self { transport, chat_id: message.chat_id, current: Some(message) }
    }

    pub fn message(&self) -> Option<MessageRef> {
        self.current
    }

    pub async fn show(&mut self, text: &str) {
        self.show_with(text, None).await;
    }

    /// Edit the current message, or post one if there is none or the edit
    /// failed.
    pub async fn show_with(&mut self, text: &str, keyboard: Option<&Keyboard>) {
        if let Some(current) = self.current {
            match self.transport.edit_text(current, text, keyboard).await {
                Ok(()) => return,
                Err(e) => warn!(chat_id = self.chat_id, "Status edit failed, posting anew: {:#}", e),
            }
        }
        match self.transport.send_text(self.chat_id, text, keyboard).await {
            Ok(sent) => self.current = Some(sent),
            Err(e) => {
                warn!(chat_id = self.chat_id, "Failed to post status: {:#}", e);
                self.current = None;
            }
        }
    }

    /// Delete the message. Failures are logged only.
    pub async fn clear(&mut self) {
        if let Some(current) = self.current.take() {
            if let Err(e) = self.transport.delete(current).await {
                debug!(chat_id = self.chat_id, "Status delete failed: {:#}", e);
            }
        }
    }
}
