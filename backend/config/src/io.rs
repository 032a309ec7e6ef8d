//! Locating and reading the config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::LinkgrabConfig;

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Priority: `LINKGRAB_CONFIG_DIR` env > `~/.linkgrab/` > `./.linkgrab`.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("LINKGRAB_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".linkgrab"),
        None => PathBuf::from(".linkgrab"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Relative paths in the config are relative to the config directory.
pub fn resolve_path(config_dir: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    }
}

/// Read the YAML file as a generic value. A missing file is an empty
/// mapping, so a bot configured purely from the environment still starts.
pub async fn load_raw(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let value: serde_json::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    info!(path = %path.display(), "Loaded config");
    Ok(value)
}

/// Typed load without substitution or defaults.
pub async fn load_config(path: &Path) -> Result<LinkgrabConfig> {
    let value = load_raw(path).await?;
    serde_json::from_value(value)
        .with_context(|| format!("Config at {} does not match the schema", path.display()))
}
