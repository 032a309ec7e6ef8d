//! Stages run in order before every command handler.
//!
//! The chain is assembled explicitly by the caller (see
//! [`crate::build_dispatcher`]): usage tracking, then the admin gate, then
//! rate limiting.

use std::sync::Arc;

use async_trait::async_trait;
use linkgrab_i18n::{Catalog, Category};
use linkgrab_infra::StatsStore;
use tracing::{info, warn};

use crate::dispatch::{CommandContext, CommandResponse};
use crate::rate_limit::CommandRateLimiter;
use crate::types::CommandDef;

pub enum Flow {
    Continue,
    /// Stop the chain and answer with this response.
    Reject(CommandResponse),
}

#[async_trait]
pub trait Middleware: Send + Sync {
    fn name(&self) -> &'static str;
    async fn before(&self, ctx: &CommandContext, def: &CommandDef) -> Flow;
}

// ---------------------------------------------------------------------------
// Usage tracking
// ---------------------------------------------------------------------------

pub struct UsageTracking {
    pub stats: Arc<StatsStore>,
}

#[async_trait]
impl Middleware for UsageTracking {
    fn name(&self) -> &'static str { "usage_tracking" }

    async fn before(&self, ctx: &CommandContext, def: &CommandDef) -> Flow {
        let scope = if ctx.is_private { "private" } else { "group" };
        info!(
            user_id = ctx.user.id,
            username = %ctx.user.handle(),
            chat_id = ctx.chat_id,
            scope,
            command = %def.key,
            "Command used"
        );
        self.stats.add_user(ctx.user.id).await;
        self.stats.add_command().await;
        Flow::Continue
    }
}

// ---------------------------------------------------------------------------
// Admin gate
// ---------------------------------------------------------------------------

pub struct AdminGate {
    pub catalog: Arc<Catalog>,
}

#[async_trait]
impl Middleware for AdminGate {
    fn name(&self) -> &'static str { "admin_gate" }

    async fn before(&self, ctx: &CommandContext, def: &CommandDef) -> Flow {
        if !def.admin_only || ctx.is_admin {
            return Flow::Continue;
        }
        warn!(user_id = ctx.user.id, command = %def.key, "Non-admin tried an admin command");
        Flow::Reject(CommandResponse::text(self.catalog.text(
            ctx.locale,
            Category::Errors,
            "access_denied",
        )))
    }
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

pub struct RateLimitGate {
    pub catalog: Arc<Catalog>,
    pub limiter: Arc<CommandRateLimiter>,
}

#[async_trait]
impl Middleware for RateLimitGate {
    fn name(&self) -> &'static str { "rate_limit" }

    async fn before(&self, ctx: &CommandContext, def: &CommandDef) -> Flow {
        let Some(limit) = def.rate_limit else {
            return Flow::Continue;
        };
        let result = self.limiter.check(ctx.user.id, &def.key, limit).await;
        if result.allowed {
            return Flow::Continue;
        }
        info!(
            user_id = ctx.user.id,
            command = %def.key,
            retry_after_secs = result.retry_after.as_secs(),
            "Rate limited"
        );
        Flow::Reject(CommandResponse::text(self.catalog.text(
            ctx.locale,
            Category::Errors,
            "rate_limited",
        )))
    }
}
