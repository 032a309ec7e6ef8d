/// Command dispatch: route detected commands through the middleware chain
/// to their handlers.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use linkgrab_core::{Keyboard, UserRef};
use linkgrab_i18n::{Catalog, Category, Locale};
use tracing::{error, info, warn};

use crate::middleware::{Flow, Middleware};
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// Context passed to every command handler.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub user: UserRef,
    pub chat_id: i64,
    pub is_private: bool,
    pub locale: Locale,
    pub is_admin: bool,
    /// When the inbound message reached the bot.
    pub received_at: Instant,
}

/// Side effects the transport layer carries out after replying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the text to every known user and report the tally.
    Broadcast(String),
    /// Send `ack`, then stop the bot.
    Shutdown { ack: String },
}

/// The result returned by a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub effects: Vec<Effect>,
}

impl CommandResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None, effects: Vec::new() }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Result<CommandResponse>;
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher {
    registry: CommandRegistry,
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    middleware: Vec<Arc<dyn Middleware>>,
    catalog: Arc<Catalog>,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry, catalog: Arc<Catalog>) -> Self {
        Self {
            registry,
            handlers: HashMap::new(),
            middleware: Vec::new(),
            catalog,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn register(&mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(key.into(), handler);
    }

    /// Append a stage. Stages run in insertion order before the handler.
    pub fn layer(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Run the chain and the handler. Handler errors become the localized
    /// generic error text; `None` means no handler is registered.
    pub async fn dispatch(&self, ctx: &CommandContext, inv: &CommandInvocation) -> Option<CommandResponse> {
        let Some(def) = self.registry.find_by_key(&inv.key) else {
            warn!(command = %inv.key, "Command not in registry");
            return None;
        };

        for stage in &self.middleware {
            if let Flow::Reject(response) = stage.before(ctx, def).await {
                info!(command = %inv.key, stage = stage.name(), user_id = ctx.user.id, "Command rejected");
                return Some(response);
            }
        }

        let Some(handler) = self.handlers.get(&inv.key) else {
            warn!(command = %inv.key, "No handler registered");
            return None;
        };

        info!("[Commands] Dispatching /{} for user {}", inv.key, ctx.user.id);
        match handler.handle(ctx, inv).await {
            Ok(response) => Some(response),
            Err(e) => {
                error!(
                    command = %inv.key,
                    user_id = ctx.user.id,
                    username = %ctx.user.handle(),
                    "Command handler failed: {:#}",
                    e
                );
                Some(CommandResponse::text(self.catalog.text(
                    ctx.locale,
                    Category::Errors,
                    "generic",
                )))
            }
        }
    }
}
