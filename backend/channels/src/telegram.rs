//! Telegram Bot API binding: the outbound transport and the long-polling
//! adapter feeding the router.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use linkgrab_core::{Keyboard, UserRef};
use linkgrab_media::{detect_mime_type, DeliveryKind};
use teloxide::prelude::*;
use teloxide::types::{
    ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, User,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::progress::ProgressReader;
use crate::router::{InboundCallback, InboundRouter, InboundText};
use crate::transport::{ChatTransport, MediaUpload, MessageRef};
use crate::ChannelAdapter;

/// Build a bot client, optionally against a self-hosted Bot API server.
pub fn build_bot(token: &str, api_url: Option<&str>) -> Result<Bot> {
    let bot = Bot::new(token);
    match api_url {
        Some(url) => {
            let url = url.parse().with_context(|| format!("invalid Bot API url {url}"))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

fn markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.clone()))
            .collect::<Vec<_>>()
    }))
}

fn user_ref(user: &User) -> UserRef {
    UserRef {
        id: user.id.0 as i64,
        username: user.username.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<MessageRef> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(markup(keyboard));
        }
        let sent = request.await?;
        Ok(MessageRef { chat_id, message_id: sent.id.0 })
    }

    async fn edit_text(&self, message: MessageRef, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let mut request = self
            .bot
            .edit_message_text(ChatId(message.chat_id), MessageId(message.message_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(markup(keyboard));
        }
        request.await?;
        Ok(())
    }

    async fn delete(&self, message: MessageRef) -> Result<()> {
        self.bot
            .delete_message(ChatId(message.chat_id), MessageId(message.message_id))
            .await?;
        Ok(())
    }

    async fn send_media(&self, chat_id: i64, upload: MediaUpload) -> Result<()> {
        let file = tokio::fs::File::open(&upload.path)
            .await
            .with_context(|| format!("opening {}", upload.path.display()))?;
        let input = InputFile::read(ProgressReader::new(file, upload.size, upload.progress))
            .file_name(upload.file_name.clone());

        info!(
            chat_id,
            file = %upload.file_name,
            mime = detect_mime_type(&upload.path),
            bytes = upload.size,
            kind = ?upload.kind,
            "Uploading media"
        );
        match upload.kind {
            DeliveryKind::Video => {
                self.bot
                    .send_video(ChatId(chat_id), input)
                    .caption(upload.caption)
                    .supports_streaming(true)
                    .await?;
            }
            DeliveryKind::Document => {
                self.bot
                    .send_document(ChatId(chat_id), input)
                    .caption(upload.caption)
                    .await?;
            }
        }
        Ok(())
    }

    async fn typing(&self, chat_id: i64) -> Result<()> {
        self.bot.send_chat_action(ChatId(chat_id), ChatAction::Typing).await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>, alert: bool) -> Result<()> {
        let mut request = self.bot.answer_callback_query(callback_id.to_string());
        if let Some(text) = text {
            request = request.text(text).show_alert(alert);
        }
        request.await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

pub struct TelegramAdapter {
    bot: Bot,
}

impl TelegramAdapter {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

async fn on_message(msg: Message, router: Arc<InboundRouter>) -> ResponseResult<()> {
    let (Some(from), Some(text)) = (msg.from.as_ref(), msg.text()) else {
        return respond(());
    };
    router
        .handle_text(InboundText {
            user: user_ref(from),
            chat_id: msg.chat.id.0,
            message_id: msg.id.0,
            is_private: msg.chat.is_private(),
            text: text.to_string(),
            received_at: Instant::now(),
        })
        .await;
    respond(())
}

async fn on_callback(q: CallbackQuery, router: Arc<InboundRouter>) -> ResponseResult<()> {
    let message = q.message.as_ref().map(|m| MessageRef {
        chat_id: m.chat().id.0,
        message_id: m.id().0,
    });
    router
        .handle_callback(InboundCallback {
            id: q.id.clone(),
            user: user_ref(&q.from),
            data: q.data.clone().unwrap_or_default(),
            message,
        })
        .await;
    respond(())
}

#[async_trait]
impl ChannelAdapter for TelegramAdapter {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self, router: Arc<InboundRouter>, shutdown: CancellationToken) -> Result<()> {
        let me = self.bot.get_me().await.context("Telegram rejected the bot token")?;
        info!(bot = %me.username(), "Starting Telegram adapter");

        let handler = dptree::entry()
            .branch(Update::filter_message().endpoint(on_message))
            .branch(Update::filter_callback_query().endpoint(on_callback));

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![router])
            // updates run concurrently, even within one chat
            .distribution_function(|_| None::<std::convert::Infallible>)
            .default_handler(|_| async {
                debug!("Unhandled update");
            })
            .build();

        let token = dispatcher.shutdown_token();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            match token.shutdown() {
                Ok(stopped) => {
                    stopped.await;
                    info!("Telegram polling stopped");
                }
                Err(e) => warn!("Telegram dispatcher was not running: {}", e),
            }
        });

        dispatcher.dispatch().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgrab_core::Button;

    #[test]
    fn keyboard_rows_are_preserved() {
        let keyboard = Keyboard::grid(
            vec![
                Button::new("A", "lang_az"),
                Button::new("B", "lang_en"),
                Button::new("C", "lang_tr"),
            ],
            2,
        );
        let markup = markup(&keyboard);
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1][0].text, "C");
    }

    #[test]
    fn bad_api_url_is_rejected() {
        assert!(build_bot("123:abc", Some("not a url")).is_err());
        assert!(build_bot("123:abc", Some("http://localhost:8081")).is_ok());
    }
}
