/// Slash command detection: identify /commands at the start of inbound text.
use crate::registry::CommandRegistry;
use crate::types::CommandInvocation;

/// Detect a slash command at the start of a message string.
///
/// `/cmd@SomeBot args` is accepted; the `@` suffix is dropped. Returns `None`
/// for normal text and for unknown commands.
pub fn detect_command(text: &str, registry: &CommandRegistry) -> Option<CommandInvocation> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (alias_part, rest) = trimmed
        .split_once(|c: char| c.is_whitespace())
        .map(|(a, r)| (a, r.trim()))
        .unwrap_or((trimmed, ""));

    let alias = alias_part.split('@').next().unwrap_or(alias_part);
    let def = registry.find_by_alias(alias)?;

    let args = if def.accepts_args {
        rest.split_whitespace().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    Some(CommandInvocation {
        key: def.key.clone(),
        raw_alias: alias.to_string(),
        args,
        raw_args: rest.to_string(),
    })
}

/// True for text that starts like a command, known or not.
pub fn looks_like_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}
