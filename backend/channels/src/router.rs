//! Routes inbound chat events: commands, links, callbacks and plain text.

use std::sync::Arc;
use std::time::{Duration, Instant};

use linkgrab_commands::{
    detect_command, language_keyboard, looks_like_command, small_talk_reply, welcome_text,
    CommandContext, CommandDispatcher, CommandInvocation, Effect,
};
use linkgrab_core::{classify, extract_link, is_link_candidate, CallbackPayload, UserRef};
use linkgrab_i18n::{Catalog, Category, Locale};
use linkgrab_infra::{LanguageStore, StatsStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::coordinator::LinkCoordinator;
use crate::notify::AdminNotifier;
use crate::transport::{ChatTransport, MessageRef};

/// Pause between broadcast messages, under Telegram's bulk limit.
const BROADCAST_PACE: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct InboundText {
    pub user: UserRef,
    pub chat_id: i64,
    pub message_id: i32,
    pub is_private: bool,
    pub text: String,
    pub received_at: Instant,
}

#[derive(Debug, Clone)]
pub struct InboundCallback {
    pub id: String,
    pub user: UserRef,
    pub data: String,
    /// The message the button belongs to, when still accessible.
    pub message: Option<MessageRef>,
}

pub struct RouterDeps {
    pub transport: Arc<dyn ChatTransport>,
    pub catalog: Arc<Catalog>,
    pub languages: Arc<LanguageStore>,
    pub stats: Arc<StatsStore>,
    pub dispatcher: CommandDispatcher,
    pub coordinator: Arc<LinkCoordinator>,
    pub notifier: Arc<AdminNotifier>,
    pub admins: Vec<i64>,
    pub shutdown: CancellationToken,
}

pub struct InboundRouter {
    deps: RouterDeps,
}

impl InboundRouter {
    pub fn new(deps: RouterDeps) -> Self {
        Self { deps }
    }

    fn is_admin(&self, user_id: i64) -> bool {
        self.deps.admins.contains(&user_id)
    }

    pub async fn handle_text(&self, msg: InboundText) {
        let d = &self.deps;

        if looks_like_command(&msg.text) {
            match detect_command(&msg.text, d.dispatcher.registry()) {
                Some(inv) => self.run_command(&msg, inv).await,
                None => debug!(user_id = msg.user.id, "Ignoring unknown command"),
            }
            return;
        }

        if let Some(platform) = classify(&msg.text) {
            if !msg.is_private {
                return;
            }
            self.typing(msg.chat_id).await;
            let origin = MessageRef { chat_id: msg.chat_id, message_id: msg.message_id };
            let url = extract_link(&msg.text, platform).to_string();
            info!(user_id = msg.user.id, %platform, "Link request accepted");
            d.coordinator.spawn_link(msg.user, origin, url, platform);
            return;
        }

        if !self.is_admin(msg.user.id) {
            d.notifier.forward_text(&msg.user, &msg.text).await;
        }
        if !msg.is_private {
            return;
        }

        let locale = d.languages.get(msg.user.id).await;
        let reply = if is_link_candidate(&msg.text) {
            Some(d.catalog.text(locale, Category::Status, "not_supported"))
        } else {
            small_talk_reply(&d.catalog, locale, &msg.text, &msg.user.first_name)
        };
        if let Some(reply) = reply {
            self.typing(msg.chat_id).await;
            self.send(msg.chat_id, &reply).await;
        }
    }

    async fn run_command(&self, msg: &InboundText, inv: CommandInvocation) {
        let d = &self.deps;
        self.typing(msg.chat_id).await;

        let ctx = CommandContext {
            user: msg.user.clone(),
            chat_id: msg.chat_id,
            is_private: msg.is_private,
            locale: d.languages.get(msg.user.id).await,
            is_admin: self.is_admin(msg.user.id),
            received_at: msg.received_at,
        };
        let Some(response) = d.dispatcher.dispatch(&ctx, &inv).await else {
            return;
        };

        if let Err(e) = d.transport.send_text(msg.chat_id, &response.text, response.keyboard.as_ref()).await {
            warn!(chat_id = msg.chat_id, command = %inv.key, "Failed to send command reply: {:#}", e);
        }
        for effect in response.effects {
            self.apply(msg.chat_id, ctx.locale, effect).await;
        }
    }

    async fn apply(&self, chat_id: i64, locale: Locale, effect: Effect) {
        let d = &self.deps;
        match effect {
            Effect::Broadcast(text) => {
                let recipients = d.stats.snapshot().await.unique_users;
                let (mut delivered, mut failed) = (0usize, 0usize);
                for user_id in recipients {
                    match d.transport.send_text(user_id, &text, None).await {
                        Ok(_) => delivered += 1,
                        Err(e) => {
                            debug!(user_id, "Broadcast delivery failed: {:#}", e);
                            failed += 1;
                        }
                    }
                    tokio::time::sleep(BROADCAST_PACE).await;
                }
                info!(delivered, failed, "Broadcast finished");
                let (delivered, failed) = (delivered.to_string(), failed.to_string());
                let summary = d.catalog.render(
                    locale,
                    Category::Admin,
                    "broadcast_done",
                    &[("delivered", &delivered), ("failed", &failed)],
                );
                self.send(chat_id, &summary).await;
            }
            Effect::Shutdown { ack } => {
                self.send(chat_id, &ack).await;
                warn!("Shutdown requested via command");
                d.shutdown.cancel();
            }
        }
    }

    pub async fn handle_callback(&self, cb: InboundCallback) {
        let d = &self.deps;
        match CallbackPayload::parse(&cb.data) {
            Some(CallbackPayload::Language(code)) => self.change_language(&cb, &code).await,
            Some(CallbackPayload::YoutubeFormat { kind, message_id }) => match cb.message {
                Some(message) => {
                    d.coordinator
                        .spawn_format_choice(cb.id, cb.user, message.chat_id, kind, message_id);
                }
                None => {
                    let locale = d.languages.get(cb.user.id).await;
                    let expired = d.catalog.text(locale, Category::Youtube, "selection_expired");
                    self.answer(&cb.id, Some(&expired), true).await;
                }
            },
            None => {
                debug!(data = %cb.data, "Unrecognized callback payload");
                self.answer(&cb.id, None, false).await;
            }
        }
    }

    async fn change_language(&self, cb: &InboundCallback, code: &str) {
        let d = &self.deps;
        match d.languages.set(cb.user.id, code).await {
            Ok(locale) => {
                let changed = d.catalog.text(locale, Category::Language, "changed");
                self.answer(&cb.id, Some(&changed), true).await;
                if let Some(message) = cb.message {
                    let text = welcome_text(&d.catalog, locale);
                    if let Err(e) = d.transport.edit_text(message, &text, Some(&language_keyboard())).await {
                        debug!(user_id = cb.user.id, "Failed to re-render welcome: {:#}", e);
                    }
                }
            }
            Err(e) => {
                warn!(user_id = cb.user.id, code, "Language change rejected: {}", e);
                let locale = d.languages.get(cb.user.id).await;
                let text = d.catalog.text(locale, Category::Language, "error");
                self.answer(&cb.id, Some(&text), true).await;
            }
        }
    }

    async fn typing(&self, chat_id: i64) {
        if let Err(e) = self.deps.transport.typing(chat_id).await {
            debug!(chat_id, "Typing indicator failed: {:#}", e);
        }
    }

    async fn send(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.deps.transport.send_text(chat_id, text, None).await {
            warn!(chat_id, "Failed to send message: {:#}", e);
        }
    }

    async fn answer(&self, callback_id: &str, text: Option<&str>, alert: bool) {
        if let Err(e) = self.deps.transport.answer_callback(callback_id, text, alert).await {
            warn!("Failed to answer callback: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Recorded, ScriptedExtractor, ADMIN_ID};
    use linkgrab_i18n::Locale;

    const USER: i64 = 42;

    fn text(user_id: i64, chat_id: i64, is_private: bool, text: &str) -> InboundText {
        InboundText {
            user: UserRef::new(user_id, "Leyla"),
            chat_id,
            message_id: 5,
            is_private,
            text: text.into(),
            received_at: Instant::now(),
        }
    }

    fn private(user_id: i64, body: &str) -> InboundText {
        text(user_id, user_id, true, body)
    }

    fn callback(data: &str, message: Option<MessageRef>) -> InboundCallback {
        InboundCallback {
            id: "cb".into(),
            user: UserRef::new(USER, "Leyla"),
            data: data.into(),
            message,
        }
    }

    async fn harness() -> Harness {
        let h = Harness::new(ScriptedExtractor::succeeding_at(1)).await;
        h.languages.set(USER, "en").await.unwrap();
        h.languages.set(ADMIN_ID, "en").await.unwrap();
        h
    }

    #[tokio::test]
    async fn start_replies_with_welcome_and_language_keyboard() {
        let h = harness().await;
        h.router.handle_text(private(USER, "/start")).await;

        let log = h.transport.log();
        assert_eq!(log[0], Recorded::Typing(USER));
        match &log[1] {
            Recorded::Text { chat_id, text, keyboard: Some(kb), .. } => {
                assert_eq!(*chat_id, USER);
                assert_eq!(*text, welcome_text(&h.catalog, Locale::En));
                assert_eq!(kb.buttons().count(), 4);
            }
            other => panic!("expected welcome, got {other:?}"),
        }
        assert_eq!(h.stats.snapshot().await.commands_used, 1);
    }

    #[tokio::test]
    async fn unknown_command_is_ignored() {
        let h = harness().await;
        h.router.handle_text(private(USER, "/frobnicate now")).await;
        assert!(h.transport.log().is_empty());
    }

    #[tokio::test]
    async fn plain_text_is_forwarded_and_answered() {
        let h = harness().await;
        h.router.handle_text(private(USER, "hi there")).await;

        let log = h.transport.log();
        assert!(matches!(&log[0], Recorded::Text { chat_id: ADMIN_ID, text, .. } if text.contains("hi there")));
        let expected = small_talk_reply(&h.catalog, Locale::En, "hi there", "Leyla").unwrap();
        assert_eq!(h.transport.texts().last().unwrap(), &expected);
    }

    #[tokio::test]
    async fn admin_text_is_not_forwarded() {
        let h = harness().await;
        h.router.handle_text(private(ADMIN_ID, "just a note")).await;
        assert!(h.transport.log().is_empty());
    }

    #[tokio::test]
    async fn unsupported_link_gets_notice() {
        let h = harness().await;
        h.router.handle_text(private(USER, "https://vimeo.com/123")).await;
        assert_eq!(
            h.transport.texts().last().unwrap(),
            &h.catalog.text(Locale::En, Category::Status, "not_supported")
        );
    }

    #[tokio::test]
    async fn links_in_groups_are_ignored() {
        let h = harness().await;
        h.router
            .handle_text(text(USER, -100, false, "https://www.tiktok.com/@a/video/1"))
            .await;
        assert!(h.transport.log().is_empty());
        assert!(h.extractor.attempts().is_empty());
    }

    #[tokio::test]
    async fn private_link_starts_a_download() {
        let h = harness().await;
        h.router
            .handle_text(private(USER, "look https://www.tiktok.com/@a/video/1 wow"))
            .await;

        for _ in 0..200 {
            if h.stats.snapshot().await.total_downloads == 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(h.stats.snapshot().await.total_downloads, 1);
        assert_eq!(h.transport.log()[0], Recorded::Typing(USER));
    }

    #[tokio::test]
    async fn language_callback_switches_locale() {
        let h = harness().await;
        let message = MessageRef { chat_id: USER, message_id: 77 };
        h.router.handle_callback(callback("lang_ru", Some(message))).await;

        assert_eq!(h.languages.get(USER).await, Locale::Ru);
        let log = h.transport.log();
        assert_eq!(
            log[0],
            Recorded::Answer {
                callback_id: "cb".into(),
                text: Some(h.catalog.text(Locale::Ru, Category::Language, "changed")),
                alert: true,
            }
        );
        assert_eq!(
            log[1],
            Recorded::Edit {
                message,
                text: welcome_text(&h.catalog, Locale::Ru),
                keyboard: Some(language_keyboard()),
            }
        );
    }

    #[tokio::test]
    async fn unknown_language_code_is_rejected() {
        let h = harness().await;
        h.router.handle_callback(callback("lang_xx", None)).await;

        assert_eq!(h.languages.get(USER).await, Locale::En);
        assert!(matches!(
            &h.transport.log()[0],
            Recorded::Answer { text: Some(t), alert: true, .. } if *t == h.catalog.text(Locale::En, Category::Language, "error")
        ));
    }

    #[tokio::test]
    async fn format_callback_without_message_expires() {
        let h = harness().await;
        h.router.handle_callback(callback("yt_video|9", None)).await;
        assert!(matches!(
            &h.transport.log()[0],
            Recorded::Answer { text: Some(t), .. } if *t == h.catalog.text(Locale::En, Category::Youtube, "selection_expired")
        ));
    }

    #[tokio::test]
    async fn garbage_callback_gets_empty_answer() {
        let h = harness().await;
        h.router.handle_callback(callback("nonsense", None)).await;
        assert_eq!(
            h.transport.log(),
            vec![Recorded::Answer { callback_id: "cb".into(), text: None, alert: false }]
        );
    }

    #[tokio::test]
    async fn broadcast_reaches_known_users() {
        let h = harness().await;
        h.stats.add_user(5).await;
        h.stats.add_user(6).await;
        h.languages.set(ADMIN_ID, "ru").await.unwrap();
        h.router.handle_text(private(ADMIN_ID, "/broadcast Maintenance tonight")).await;

        let delivered: Vec<i64> = h
            .transport
            .log()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Text { chat_id, text, .. } if text == "Maintenance tonight" => Some(chat_id),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec![ADMIN_ID, 5, 6]);
        assert_eq!(
            h.transport.texts().last().unwrap(),
            "✅ Рассылка завершена\nДоставлено: 3\nОшибок: 0"
        );
    }

    #[tokio::test]
    async fn shutdown_is_admin_only() {
        let h = harness().await;
        h.router.handle_text(private(USER, "/shutdown")).await;
        assert!(!h.shutdown.is_cancelled());

        h.router.handle_text(private(ADMIN_ID, "/shutdown")).await;
        assert!(h.shutdown.is_cancelled());
        assert!(h.transport.texts().last().unwrap().starts_with("✅ Shutdown command received"));
    }
}
