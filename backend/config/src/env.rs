//! Environment handling: `${VAR}` substitution inside string values and the
//! direct overrides deployments usually set instead of editing the file.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are substituted. `$${VAR}` is an
//! escape for a literal `${VAR}`.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

use crate::schema::{DownloadsConfig, GistConfig, LinkgrabConfig, LoggingConfig, TelegramConfig};

/// Matches both `${VAR}` and the escaped `$${VAR}`.
static ENV_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute references from the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute references from `env`. Unset or empty variables are errors.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute(value, env, "")
}

fn substitute(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute_str(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute_str(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }
    let mut missing = None;
    let replaced = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        if caps[0].starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });
    if let Some(var_name) = missing {
        bail!(MissingEnvVarError { var_name, config_path: path.to_string() });
    }
    Ok(replaced.into_owned())
}

/// Names of every variable referenced anywhere in the tree, sorted.
pub fn collect_referenced_vars(value: &Value) -> Vec<String> {
    fn walk(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::String(s) => out.extend(
                ENV_REF
                    .captures_iter(s)
                    .filter(|c| !c[0].starts_with("$$"))
                    .map(|c| c[1].to_string()),
            ),
            Value::Array(items) => items.iter().for_each(|v| walk(v, out)),
            Value::Object(map) => map.values().for_each(|v| walk(v, out)),
            _ => {}
        }
    }
    let mut vars = Vec::new();
    walk(value, &mut vars);
    vars.sort();
    vars.dedup();
    vars
}

// ---------------------------------------------------------------------------
// Direct overrides
// ---------------------------------------------------------------------------

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: LinkgrabConfig) -> Result<LinkgrabConfig> {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Variables that, when set and non-empty, win over the file.
pub fn apply_env_overrides_with(
    mut config: LinkgrabConfig,
    env: &HashMap<String, String>,
) -> Result<LinkgrabConfig> {
    let get = |name: &str| env.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

    if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
        config.telegram.get_or_insert_with(TelegramConfig::default).token = Some(token.to_string());
    }
    if let Some(raw) = get("ADMIN_IDS") {
        config.admins = parse_admin_ids(raw)?;
    }
    if let Some(token) = get("GITHUB_TOKEN") {
        config.gist.get_or_insert_with(GistConfig::default).token = Some(token.to_string());
    }
    if let Some(id) = get("STATS_GIST_ID") {
        config.gist.get_or_insert_with(GistConfig::default).gist_id = Some(id.to_string());
    }
    if let Some(path) = get("INSTAGRAM_COOKIES") {
        config.downloads.get_or_insert_with(DownloadsConfig::default).instagram_cookies =
            Some(path.to_string());
    }
    if let Some(path) = get("YTDLP_PATH") {
        config.downloads.get_or_insert_with(DownloadsConfig::default).yt_dlp_path =
            Some(path.to_string());
    }
    if let Some(level) = get("LOG_LEVEL") {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level.to_string());
    }
    if let Some(dir) = get("LOG_DIR") {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir.to_string());
    }
    debug!("Applied environment overrides");
    Ok(config)
}

/// Comma separated user ids; blanks are skipped.
fn parse_admin_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .with_context(|| format!("ADMIN_IDS contains a non-numeric id: {s}"))
        })
        .collect()
}
