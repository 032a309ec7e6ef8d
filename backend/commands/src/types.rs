//! Slash command types.

use std::time::Duration;

/// Sliding-window limit applied per (user, command).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max_requests: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const fn new(max_requests: usize, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// A command entry in the registry.
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// Unique key (e.g. "start", "broadcast").
    pub key: String,
    /// Slash aliases (must start with '/').
    pub text_aliases: Vec<String>,
    /// Only configured admins may run it.
    pub admin_only: bool,
    pub rate_limit: Option<RateLimit>,
    pub accepts_args: bool,
}

impl CommandDef {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            text_aliases: vec![format!("/{key}")],
            admin_only: false,
            rate_limit: None,
            accepts_args: false,
        }
    }

    pub fn admin(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn with_args(mut self) -> Self {
        self.accepts_args = true;
        self
    }

    pub fn limited(mut self, limit: RateLimit) -> Self {
        self.rate_limit = Some(limit);
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.text_aliases.push(alias.to_string());
        self
    }

    /// Primary alias (first in list), or key if none.
    pub fn primary_alias(&self) -> &str {
        self.text_aliases.first().map(|s| s.as_str()).unwrap_or(&self.key)
    }
}

/// A detected and parsed slash-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub key: String,
    pub raw_alias: String,
    /// Whitespace-separated arguments.
    pub args: Vec<String>,
    /// Full remaining text after the command name.
    pub raw_args: String,
}
