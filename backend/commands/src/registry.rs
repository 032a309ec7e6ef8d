use crate::types::{CommandDef, RateLimit};

/// `/echo` allowance per user.
pub const ECHO_LIMIT: RateLimit = RateLimit::new(10, 60);

/// The built-in command set.
pub fn builtin_commands() -> Vec<CommandDef> {
    vec![
        CommandDef::new("start"),
        CommandDef::new("language").alias("/lang"),
        CommandDef::new("help"),
        CommandDef::new("info"),
        CommandDef::new("stats"),
        CommandDef::new("ping"),
        CommandDef::new("echo")
            .with_args()
            .limited(ECHO_LIMIT),
        CommandDef::new("admin").admin(),
        CommandDef::new("broadcast")
            .admin()
            .with_args(),
        CommandDef::new("shutdown").admin(),
    ]
}

pub struct CommandRegistry {
    commands: Vec<CommandDef>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: builtin_commands() }
    }

    /// Replace the rate limit of a registered command. Returns false when
    /// no command has that key.
    pub fn set_rate_limit(&mut self, key: &str, limit: RateLimit) -> bool {
        match self.commands.iter_mut().find(|c| c.key == key) {
            Some(def) => {
                def.rate_limit = Some(limit);
                true
            }
            None => false,
        }
    }

    pub fn all(&self) -> &[CommandDef] {
        &self.commands
    }

    /// Find a command by slash-text alias (e.g. "/help").
    pub fn find_by_alias(&self, alias: &str) -> Option<&CommandDef> {
        let lower = alias.to_lowercase();
        self.commands.iter().find(|c| {
            c.text_aliases.iter().any(|a| a.to_lowercase() == lower)
        })
    }

    pub fn find_by_key(&self, key: &str) -> Option<&CommandDef> {
        self.commands.iter().find(|c| c.key == key)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_commands_are_flagged() {
        let registry = CommandRegistry::new();
        for key in ["admin", "broadcast", "shutdown"] {
            assert!(registry.find_by_key(key).unwrap().admin_only, "{key}");
        }
        assert!(!registry.find_by_key("start").unwrap().admin_only);
    }

    #[test]
    fn aliases_match_case_insensitively() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_by_alias("/HELP").unwrap().key, "help");
        assert_eq!(registry.find_by_alias("/lang").unwrap().key, "language");
        assert!(registry.find_by_alias("/nope").is_none());
    }

    #[test]
    fn echo_is_rate_limited() {
        let registry = CommandRegistry::new();
        assert_eq!(registry.find_by_key("echo").unwrap().rate_limit, Some(ECHO_LIMIT));
    }

    #[test]
    fn rate_limit_can_be_overridden() {
        let mut registry = CommandRegistry::new();
        let limit = RateLimit::new(3, 10);
        assert!(registry.set_rate_limit("echo", limit));
        assert_eq!(registry.find_by_key("echo").unwrap().rate_limit, Some(limit));
        assert!(!registry.set_rate_limit("missing", limit));
    }
}
