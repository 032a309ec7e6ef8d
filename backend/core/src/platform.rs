use std::fmt;

use serde::{Deserialize, Serialize};

/// A source service the bot can download from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::TikTok, Platform::Instagram, Platform::YouTube];

    /// Lowercase identifier used in temp file names, stats keys and catalog keys.
    pub fn slug(self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
        }
    }

    /// Human-readable brand name.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Domain substrings in precedence order. First match wins.
const DOMAINS: &[(&str, Platform)] = &[
    ("tiktok.com", Platform::TikTok),
    ("youtu.be", Platform::YouTube),
    ("youtube.com", Platform::YouTube),
    ("instagram.com", Platform::Instagram),
];

/// Classify free-form message text by the first supported domain it mentions.
///
/// Returns `None` when the text names no supported domain. Matching is
/// case-insensitive and never fails.
pub fn classify(text: &str) -> Option<Platform> {
    let lower = text.to_lowercase();
    DOMAINS
        .iter()
        .find(|(domain, _)| lower.contains(domain))
        .map(|(_, platform)| *platform)
}

/// The whitespace-separated token that mentions `platform`, so a link
/// pasted with surrounding chatter reaches the extractor alone. Falls back
/// to the trimmed text.
pub fn extract_link(text: &str, platform: Platform) -> &str {
    text.split_whitespace()
        .find(|token| classify(token) == Some(platform))
        .unwrap_or_else(|| text.trim())
}

/// True when the text looks like it carries a link at all.
pub fn is_link_candidate(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("http://") || lower.contains("https://") || lower.contains("www.")
}
