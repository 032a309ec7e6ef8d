pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod registry;
pub mod replies;
pub mod types;

use std::sync::Arc;

use linkgrab_i18n::Catalog;
use linkgrab_infra::StatsStore;

pub use detection::{detect_command, looks_like_command};
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse, Effect};
pub use handlers::{
    language_keyboard, welcome_text, AdminPanelHandler, BroadcastHandler, CatalogTextHandler,
    EchoHandler, LanguageHandler, PingHandler, ShutdownHandler, StartHandler, StatsHandler,
};
pub use middleware::{AdminGate, Flow, Middleware, RateLimitGate, UsageTracking};
pub use rate_limit::{CommandRateLimiter, RateLimitResult};
pub use registry::{builtin_commands, CommandRegistry};
pub use replies::{small_talk_reply, SmallTalk};
pub use types::{CommandDef, CommandInvocation, RateLimit};

/// Build a dispatcher pre-wired with all built-in handlers and the
/// usage → admin → rate-limit middleware chain.
pub fn build_dispatcher(catalog: Arc<Catalog>, stats: Arc<StatsStore>) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new(CommandRegistry::new(), catalog.clone());

    dispatcher.layer(Arc::new(UsageTracking { stats: stats.clone() }));
    dispatcher.layer(Arc::new(AdminGate { catalog: catalog.clone() }));
    dispatcher.layer(Arc::new(RateLimitGate {
        catalog: catalog.clone(),
        limiter: Arc::new(CommandRateLimiter::new()),
    }));

    dispatcher.register("start", Arc::new(StartHandler { catalog: catalog.clone() }));
    dispatcher.register("language", Arc::new(LanguageHandler { catalog: catalog.clone() }));
    dispatcher.register("help", Arc::new(CatalogTextHandler { catalog: catalog.clone(), key: "help" }));
    dispatcher.register("info", Arc::new(CatalogTextHandler { catalog: catalog.clone(), key: "info" }));
    dispatcher.register("stats", Arc::new(StatsHandler { catalog: catalog.clone(), stats }));
    dispatcher.register("admin", Arc::new(AdminPanelHandler { catalog: catalog.clone() }));
    dispatcher.register("broadcast", Arc::new(BroadcastHandler { catalog: catalog.clone() }));
    dispatcher.register("shutdown", Arc::new(ShutdownHandler { catalog: catalog.clone() }));
    dispatcher.register("ping", Arc::new(PingHandler { catalog: catalog.clone() }));
    dispatcher.register("echo", Arc::new(EchoHandler { catalog }));

    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkgrab_core::UserRef;
    use linkgrab_i18n::{Category, Locale};
    use std::time::Instant;

    #[tokio::test]
    async fn every_builtin_has_a_handler() {
        let dir = std::env::temp_dir().join(format!("linkgrab-cmds-{}", uuid::Uuid::new_v4()));
        let catalog = Arc::new(Catalog::validated().unwrap());
        let stats = Arc::new(StatsStore::open(dir.join("stats.json"), None).await);
        let dispatcher = build_dispatcher(catalog.clone(), stats.clone());

        let ctx = CommandContext {
            user: UserRef::new(3, "Admin"),
            chat_id: 3,
            is_private: true,
            locale: Locale::En,
            is_admin: true,
            received_at: Instant::now(),
        };
        for def in builtin_commands() {
            let inv = detect_command(def.primary_alias(), dispatcher.registry()).unwrap();
            let resp = dispatcher.dispatch(&ctx, &inv).await;
            assert!(resp.is_some(), "/{} has no handler", def.key);
        }
        assert_eq!(stats.snapshot().await.commands_used, builtin_commands().len() as u64);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn non_admin_shutdown_is_denied_before_handler() {
        let dir = std::env::temp_dir().join(format!("linkgrab-cmds-{}", uuid::Uuid::new_v4()));
        let catalog = Arc::new(Catalog::validated().unwrap());
        let stats = Arc::new(StatsStore::open(dir.join("stats.json"), None).await);
        let dispatcher = build_dispatcher(catalog.clone(), stats);

        let ctx = CommandContext {
            user: UserRef::new(4, "Guest"),
            chat_id: 4,
            is_private: true,
            locale: Locale::Ru,
            is_admin: false,
            received_at: Instant::now(),
        };
        let inv = detect_command("/shutdown", dispatcher.registry()).unwrap();
        let resp = dispatcher.dispatch(&ctx, &inv).await.unwrap();
        assert_eq!(resp.text, catalog.text(Locale::Ru, Category::Errors, "access_denied"));
        assert!(resp.effects.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }
}
