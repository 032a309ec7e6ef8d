//! `linkgrab-config`: runtime configuration for the bot.
//!
//! Provides:
//! - Typed config schema (telegram, admins, downloads, storage, gist, limits)
//! - YAML loading with `${ENV_VAR}` substitution
//! - Direct environment overrides for deployment knobs
//! - Default value application and validation
//! - Config redaction for safe display

pub mod defaults;
pub mod env;
pub mod io;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::apply_all_defaults;
pub use env::{
    apply_env_overrides, apply_env_overrides_with, collect_referenced_vars, resolve_env_vars,
    resolve_env_vars_with, MissingEnvVarError,
};
pub use io::{config_dir, config_file_path, load_config, load_raw, resolve_path};
pub use redact::{collect_redacted_paths, redact};
pub use schema::LinkgrabConfig;
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use std::path::Path;

/// Load a config file, substitute env references, apply overrides and
/// defaults, and validate. Validation findings are returned, not raised,
/// so `check` can print them all.
pub async fn load_and_prepare(path: &Path) -> Result<(LinkgrabConfig, ValidationReport)> {
    let raw = load_raw(path).await?;
    let value = resolve_env_vars(&raw).context("Failed to resolve env vars in config")?;

    let config: LinkgrabConfig = serde_json::from_value(value)
        .with_context(|| format!("Config at {} does not match the schema", path.display()))?;
    let config = apply_env_overrides(config)?;
    let config = apply_all_defaults(config);

    let report = validate(&config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    Ok((config, report))
}
