//! Whole-file JSON persistence with atomic replace.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("gist request failed: {0}")]
    Gist(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Gist(e.to_string())
    }
}

/// Read a JSON document. A missing file yields `None`.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Store file does not exist yet");
            return Ok(None);
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_slice(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a JSON document atomically (temp file, then rename).
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }
    }

    let body = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &body).await.map_err(io_err)?;
    fs::rename(&tmp, path).await.map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("linkgrab-json-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let got: Option<BTreeMap<String, String>> = read_json(&scratch("x.json")).await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn write_then_read() {
        let path = scratch("prefs.json");
        let mut map = BTreeMap::new();
        map.insert("1".to_string(), "en".to_string());
        write_json(&path, &map).await.unwrap();

        let back: BTreeMap<String, String> = read_json(&path).await.unwrap().unwrap();
        assert_eq!(back, map);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let path = scratch("bad.json");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"{not json").await.unwrap();
        let err = read_json::<BTreeMap<String, String>>(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }
}
