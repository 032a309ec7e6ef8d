/// Built-in command handlers.
///
/// Each handler is a concrete struct implementing `CommandHandler`.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use linkgrab_core::{Button, CallbackPayload, Keyboard};
use linkgrab_i18n::{Catalog, Category, Locale};
use linkgrab_infra::StatsStore;
use tracing::{info, warn};

use crate::dispatch::{CommandContext, CommandHandler, CommandResponse, Effect};
use crate::types::CommandInvocation;

/// One button per locale, two per row, payload `lang_<code>`.
pub fn language_keyboard() -> Keyboard {
    let buttons = Locale::ALL
        .iter()
        .map(|l| Button::new(l.label(), CallbackPayload::Language(l.code().to_string()).encode()))
        .collect();
    Keyboard::grid(buttons, 2)
}

/// Welcome text followed by the language prompt.
pub fn welcome_text(catalog: &Catalog, locale: Locale) -> String {
    format!(
        "{}\n\n🌐 {}",
        catalog.text(locale, Category::Commands, "start"),
        catalog.text(locale, Category::Language, "select")
    )
}

// ---------------------------------------------------------------------------
// /start
// ---------------------------------------------------------------------------

pub struct StartHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for StartHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        info!("Start command used by {} ({})", ctx.user.id, ctx.user.handle());
        Ok(CommandResponse::text(welcome_text(&self.catalog, ctx.locale))
            .with_keyboard(language_keyboard()))
    }
}

// ---------------------------------------------------------------------------
// /language
// ---------------------------------------------------------------------------

pub struct LanguageHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for LanguageHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let prompt = self.catalog.text(ctx.locale, Category::Language, "select");
        Ok(CommandResponse::text(format!("🌐 {prompt}")).with_keyboard(language_keyboard()))
    }
}

// ---------------------------------------------------------------------------
// /help, /info
// ---------------------------------------------------------------------------

/// Replies with a fixed `commands.<key>` entry.
pub struct CatalogTextHandler {
    pub catalog: Arc<Catalog>,
    pub key: &'static str,
}

#[async_trait]
impl CommandHandler for CatalogTextHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Commands, self.key)))
    }
}

// ---------------------------------------------------------------------------
// /stats
// ---------------------------------------------------------------------------

pub struct StatsHandler {
    pub catalog: Arc<Catalog>,
    pub stats: Arc<StatsStore>,
}

#[async_trait]
impl CommandHandler for StatsHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let snap = self.stats.snapshot().await;
        let total_users = snap.total_users.to_string();
        let total_downloads = snap.total_downloads.to_string();
        let instagram = snap.platform_downloads.instagram.to_string();
        let tiktok = snap.platform_downloads.tiktok.to_string();
        let youtube = snap.platform_downloads.youtube.to_string();
        let commands = snap.commands_used.to_string();
        let started = snap.bot_started_at.format("%d.%m.%Y").to_string();
        let last_activity = snap.last_activity.format("%d.%m.%Y %H:%M").to_string();

        Ok(CommandResponse::text(self.catalog.render(
            ctx.locale,
            Category::Stats,
            "text",
            &[
                ("total_users", &total_users),
                ("total_downloads", &total_downloads),
                ("instagram", &instagram),
                ("tiktok", &tiktok),
                ("youtube", &youtube),
                ("commands", &commands),
                ("started", &started),
                ("last_activity", &last_activity),
            ],
        )))
    }
}

// ---------------------------------------------------------------------------
// /admin
// ---------------------------------------------------------------------------

pub struct AdminPanelHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for AdminPanelHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        info!("Admin command used by {}", ctx.user.id);
        Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Admin, "panel")))
    }
}

// ---------------------------------------------------------------------------
// /broadcast
// ---------------------------------------------------------------------------

pub struct BroadcastHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for BroadcastHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        if inv.raw_args.is_empty() {
            return Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Admin, "broadcast_usage")));
        }
        warn!(admin_id = ctx.user.id, chars = inv.raw_args.chars().count(), "Broadcast requested");
        Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Admin, "broadcasting"))
            .with_effect(Effect::Broadcast(inv.raw_args.clone())))
    }
}

// ---------------------------------------------------------------------------
// /shutdown
// ---------------------------------------------------------------------------

pub struct ShutdownHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for ShutdownHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        warn!("Shutdown command issued by admin {}", ctx.user.id);
        let ack = self.catalog.text(ctx.locale, Category::Admin, "shutdown_ack");
        Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Admin, "shutting_down"))
            .with_effect(Effect::Shutdown { ack }))
    }
}

// ---------------------------------------------------------------------------
// /ping
// ---------------------------------------------------------------------------

pub struct PingHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for PingHandler {
    async fn handle(&self, ctx: &CommandContext, _inv: &CommandInvocation) -> Result<CommandResponse> {
        let ms = format!("{:.2}", ctx.received_at.elapsed().as_secs_f64() * 1000.0);
        Ok(CommandResponse::text(self.catalog.render(ctx.locale, Category::Commands, "ping", &[("ms", &ms)])))
    }
}

// ---------------------------------------------------------------------------
// /echo
// ---------------------------------------------------------------------------

pub struct EchoHandler {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl CommandHandler for EchoHandler {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse> {
        if inv.raw_args.is_empty() {
            return Ok(CommandResponse::text(self.catalog.text(ctx.locale, Category::Commands, "echo_usage")));
        }
        Ok(CommandResponse::text(self.catalog.render(
            ctx.locale,
            Category::Commands,
            "echo",
            &[("text", &inv.raw_args)],
        )))
    }
}
