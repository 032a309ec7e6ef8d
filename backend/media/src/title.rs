//! Best-effort title lookup for captions and admin notices.

use std::sync::Arc;
use std::time::Duration;

use linkgrab_core::Platform;
use tracing::debug;

use crate::extractor::{Extractor, MediaMetadata, MetadataProfile};
use crate::strategy::{MOBILE_SAFARI_UA, DESKTOP_CHROME_UA};

pub const MAX_TITLE_CHARS: usize = 100;

pub struct TitleExtractor {
    extractor: Arc<dyn Extractor>,
    timeout: Duration,
}

impl TitleExtractor {
    pub fn new(extractor: Arc<dyn Extractor>, timeout: Duration) -> Self {
        Self { extractor, timeout }
    }

    /// Title for `url`, or an empty string. Never fails.
    pub async fn extract_title(&self, url: &str, platform: Platform) -> String {
        let profile = metadata_profile(platform);
        match tokio::time::timeout(self.timeout, self.extractor.metadata(url, &profile)).await {
            Ok(Ok(meta)) => pick_title(&meta),
            Ok(Err(e)) => {
                debug!(%platform, "Title lookup failed: {}", e);
                String::new()
            }
            Err(_) => {
                debug!(%platform, "Title lookup timed out");
                String::new()
            }
        }
    }
}

/// Per-platform lookup options. TikTok needs browser headers to answer at all.
pub fn metadata_profile(platform: Platform) -> MetadataProfile {
    match platform {
        Platform::TikTok => MetadataProfile {
            flat_playlist: false,
            user_agent: Some(MOBILE_SAFARI_UA.to_string()),
            headers: vec![
                ("Accept-Language".into(), "en-US,en;q=0.9".into()),
                ("Referer".into(), "https://www.tiktok.com/".into()),
            ],
        },
        Platform::YouTube => MetadataProfile {
            flat_playlist: true,
            user_agent: Some(DESKTOP_CHROME_UA.to_string()),
            headers: Vec::new(),
        },
        Platform::Instagram => MetadataProfile {
            flat_playlist: true,
            user_agent: None,
            headers: Vec::new(),
        },
    }
}

/// Title, else first line of the description, else the uploader, else empty.
pub fn pick_title(meta: &MediaMetadata) -> String {
    let non_empty = |s: &Option<String>| {
        s.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let picked = non_empty(&meta.title)
        .or_else(|| {
            meta.description
                .as_deref()
                .and_then(|d| d.lines().map(str::trim).find(|l| !l.is_empty()))
                .map(str::to_string)
        })
        .or_else(|| non_empty(&meta.uploader))
        .unwrap_or_default();

    truncate_title(&picked)
}

/// Cap at [`MAX_TITLE_CHARS`] characters, ending in `...` when shortened.
pub fn truncate_title(title: &str) -> String {
    let title = title.trim();
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let mut short: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
    short.push_str("...");
    short
}
