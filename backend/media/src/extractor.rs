//! Seam between the download orchestration and the external extraction tool.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::strategy::ExtractionStrategy;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to start extraction tool: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("extraction tool exited with {code:?}: {stderr}")]
    Exit { code: Option<i32>, stderr: String },

    #[error("extraction timed out after {0}s")]
    Timeout(u64),

    #[error("unreadable extraction output: {0}")]
    InvalidOutput(String),
}

/// Descriptive fields of a media item. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
}

/// Request options for a metadata-only lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataProfile {
    /// Skip resolving playlist entries.
    pub flat_playlist: bool,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl MetadataProfile {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--skip-download".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
        ];
        if self.flat_playlist {
            args.push("--flat-playlist".into());
        }
        if let Some(ua) = &self.user_agent {
            args.push("--user-agent".into());
            args.push(ua.clone());
        }
        for (name, value) in &self.headers {
            args.push("--add-header".into());
            args.push(format!("{name}: {value}"));
        }
        args
    }
}

/// Anything that can fetch media files and metadata for a URL.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;

    /// Download `url` with one strategy, writing to `output_template`
    /// (`<base>.%(ext)s`). Success means the tool exited cleanly; the caller
    /// still verifies a file was produced.
    async fn download(
        &self,
        url: &str,
        strategy: &ExtractionStrategy,
        output_template: &str,
    ) -> Result<(), ExtractError>;

    async fn metadata(
        &self,
        url: &str,
        profile: &MetadataProfile,
    ) -> Result<MediaMetadata, ExtractError>;
}
