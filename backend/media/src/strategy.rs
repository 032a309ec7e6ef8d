//! Extraction strategies: ordered, immutable configuration variants handed to
//! the extraction tool one attempt at a time.
//!
//! Each platform declares a [`StrategyBase`] and a list of
//! [`StrategyOverrides`]; [`StrategyOverrides::resolve`] merges the two so the
//! precedence of every field is explicit and testable on its own.

use std::path::PathBuf;

use linkgrab_core::{MediaKind, Platform};

use crate::orchestrator::DownloadError;

pub const DESKTOP_CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const MOBILE_SAFARI_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";
pub const ANDROID_CHROME_UA: &str = "Mozilla/5.0 (Linux; Android 10; SM-G973F) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
pub const YOUTUBE_IOS_UA: &str = "com.google.ios.youtube/17.33.2 (iPhone14,3; U; CPU iOS 15_6 like Mac OS X)";

/// Fully resolved configuration for one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionStrategy {
    pub name: &'static str,
    /// Format/quality selector passed to `-f`.
    pub format: String,
    /// Simulated YouTube client (`player_client` extractor argument).
    pub player_client: Option<&'static str>,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
    /// Skip adaptive (DASH/HLS) manifests.
    pub skip_adaptive: bool,
    pub lang: Option<&'static str>,
    pub cookies: Option<PathBuf>,
    /// Re-encode whatever was fetched into an mp4 container.
    pub recode_to_mp4: bool,
}

impl ExtractionStrategy {
    /// Command-line arguments for the extraction tool, excluding the URL.
    pub fn to_args(&self, output_template: &str) -> Vec<String> {
        let mut args = vec![
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "--no-progress".to_string(),
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            output_template.to_string(),
        ];

        if let Some(ua) = &self.user_agent {
            args.push("--user-agent".into());
            args.push(ua.clone());
        }
        for (name, value) in &self.headers {
            args.push("--add-header".into());
            args.push(format!("{name}: {value}"));
        }
        if let Some(extractor_args) = self.extractor_args() {
            args.push("--extractor-args".into());
            args.push(extractor_args);
        }
        if let Some(cookies) = &self.cookies {
            args.push("--cookies".into());
            args.push(cookies.display().to_string());
        }
        if self.recode_to_mp4 {
            args.push("--recode-video".into());
            args.push("mp4".into());
        }
        args
    }

    /// `youtube:` extractor arguments, when any apply.
    fn extractor_args(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(client) = self.player_client {
            parts.push(format!("player_client={client}"));
        }
        if self.skip_adaptive {
            parts.push("skip=dash,hls".to_string());
        }
        if let Some(lang) = self.lang {
            parts.push(format!("lang={lang}"));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("youtube:{}", parts.join(";")))
        }
    }
}

/// Values shared by every strategy of a platform.
#[derive(Debug, Clone)]
pub struct StrategyBase {
    pub format: String,
    pub user_agent: Option<String>,
    pub headers: Vec<(String, String)>,
    pub cookies: Option<PathBuf>,
}

/// Per-strategy deviations from the base. Unset fields inherit.
#[derive(Debug, Clone, Default)]
pub struct StrategyOverrides {
    pub format: Option<&'static str>,
    pub player_client: Option<&'static str>,
    pub user_agent: Option<&'static str>,
    /// Merged over the base headers; same-named headers replace the base value.
    pub headers: Vec<(&'static str, &'static str)>,
    pub skip_adaptive: bool,
    pub lang: Option<&'static str>,
    pub recode_to_mp4: bool,
}

impl StrategyOverrides {
    pub fn resolve(&self, name: &'static str, base: &StrategyBase) -> ExtractionStrategy {
        let mut headers = base.headers.clone();
        for (key, value) in &self.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
                Some(existing) => existing.1 = value.to_string(),
                None => headers.push((key.to_string(), value.to_string())),
            }
        }

        ExtractionStrategy {
            name,
            format: self.format.map(str::to_string).unwrap_or_else(|| base.format.clone()),
            player_client: self.player_client,
            user_agent: self
                .user_agent
                .map(str::to_string)
                .or_else(|| base.user_agent.clone()),
            headers,
            skip_adaptive: self.skip_adaptive,
            lang: self.lang,
            cookies: base.cookies.clone(),
            recode_to_mp4: self.recode_to_mp4,
        }
    }
}

fn browser_headers() -> Vec<(String, String)> {
    [
        ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
        ("Accept-Language", "en-US,en;q=0.5"),
        ("DNT", "1"),
        ("Upgrade-Insecure-Requests", "1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn youtube_headers() -> Vec<(String, String)> {
    let mut headers = browser_headers();
    headers.extend(
        [
            ("Sec-Fetch-Dest", "document"),
            ("Sec-Fetch-Mode", "navigate"),
            ("Sec-Fetch-Site", "none"),
            ("Cache-Control", "max-age=0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string())),
    );
    headers
}

/// Ordered YouTube video strategies, most permissive client first.
fn youtube_video_overrides() -> Vec<(&'static str, StrategyOverrides)> {
    vec![
        (
            "mobile-web",
            StrategyOverrides {
                format: Some("18/mp4[height<=360]/best[height<=360]"),
                player_client: Some("mweb"),
                user_agent: Some(ANDROID_CHROME_UA),
                skip_adaptive: true,
                lang: Some("en"),
                ..Default::default()
            },
        ),
        (
            "android-tv",
            StrategyOverrides {
                format: Some("mp4[height<=480]/18/mp4"),
                player_client: Some("android_tv"),
                skip_adaptive: true,
                ..Default::default()
            },
        ),
        (
            "ios",
            StrategyOverrides {
                format: Some("22/18/mp4[height<=720]/best[height<=720]"),
                player_client: Some("ios_music"),
                user_agent: Some(YOUTUBE_IOS_UA),
                skip_adaptive: true,
                ..Default::default()
            },
        ),
        (
            "embedded-player",
            StrategyOverrides {
                format: Some("worst[ext=mp4]/mp4/best[height<=360]"),
                player_client: Some("tv_embedded"),
                headers: vec![
                    ("Referer", "https://www.youtube.com/embed/"),
                    ("Origin", "https://www.youtube.com"),
                ],
                skip_adaptive: true,
                ..Default::default()
            },
        ),
        (
            "age-gate",
            StrategyOverrides {
                format: Some("18/mp4"),
                player_client: Some("android_agegate"),
                skip_adaptive: true,
                ..Default::default()
            },
        ),
        (
            "audio-to-video",
            StrategyOverrides {
                format: Some("bestaudio[ext=m4a]/bestaudio"),
                player_client: Some("android"),
                skip_adaptive: true,
                recode_to_mp4: true,
                ..Default::default()
            },
        ),
    ]
}

fn youtube_audio_overrides() -> Vec<(&'static str, StrategyOverrides)> {
    vec![
        (
            "audio-android",
            StrategyOverrides {
                player_client: Some("android"),
                skip_adaptive: true,
                ..Default::default()
            },
        ),
        (
            "audio-ios",
            StrategyOverrides {
                player_client: Some("ios_music"),
                user_agent: Some(YOUTUBE_IOS_UA),
                skip_adaptive: true,
                ..Default::default()
            },
        ),
    ]
}

/// Builds the ordered strategy list for a request.
#[derive(Debug, Clone, Default)]
pub struct StrategyTable {
    instagram_cookies: Option<PathBuf>,
}

impl StrategyTable {
    pub fn new(instagram_cookies: Option<PathBuf>) -> Self {
        Self { instagram_cookies }
    }

    /// Strategies to attempt, in order. Fails before any attempt when a
    /// required credential is not configured.
    pub fn plan(
        &self,
        platform: Platform,
        kind: MediaKind,
    ) -> Result<Vec<ExtractionStrategy>, DownloadError> {
        match platform {
            Platform::TikTok => {
                let base = StrategyBase {
                    format: "best[ext=mp4]/mp4/best".into(),
                    user_agent: Some(MOBILE_SAFARI_UA.into()),
                    headers: browser_headers(),
                    cookies: None,
                };
                Ok(vec![StrategyOverrides::default().resolve("tiktok-web", &base)])
            }
            Platform::Instagram => {
                let cookies = self
                    .instagram_cookies
                    .clone()
                    .filter(|p| p.is_file())
                    .ok_or_else(|| {
                        DownloadError::MissingCredential(
                            "Instagram cookie file is not configured or does not exist".into(),
                        )
                    })?;
                let base = StrategyBase {
                    format: "best[ext=mp4]/best".into(),
                    user_agent: None,
                    headers: Vec::new(),
                    cookies: Some(cookies),
                };
                Ok(vec![StrategyOverrides::default().resolve("instagram-cookies", &base)])
            }
            Platform::YouTube => {
                let (format, overrides) = match kind {
                    MediaKind::Video => ("18/mp4", youtube_video_overrides()),
                    MediaKind::Audio => ("bestaudio[ext=m4a]/bestaudio", youtube_audio_overrides()),
                };
                let base = StrategyBase {
                    format: format.into(),
                    user_agent: Some(DESKTOP_CHROME_UA.into()),
                    headers: youtube_headers(),
                    cookies: None,
                };
                Ok(overrides
                    .iter()
                    .map(|(name, o)| o.resolve(name, &base))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_video_order_is_fixed() {
        let table = StrategyTable::default();
        let names: Vec<_> = table
            .plan(Platform::YouTube, MediaKind::Video)
            .unwrap()
            .iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(
            names,
            ["mobile-web", "android-tv", "ios", "embedded-player", "age-gate", "audio-to-video"]
        );
    }

    #[test]
    fn tiktok_has_single_strategy() {
        let plan = StrategyTable::default().plan(Platform::TikTok, MediaKind::Video).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].format, "best[ext=mp4]/mp4/best");
        assert!(plan[0].cookies.is_none());
    }

    #[test]
    fn instagram_without_cookies_is_a_config_error() {
        let err = StrategyTable::new(None)
            .plan(Platform::Instagram, MediaKind::Video)
            .unwrap_err();
        assert!(matches!(err, DownloadError::MissingCredential(_)));

        let err = StrategyTable::new(Some(PathBuf::from("/definitely/not/here/cookies.txt")))
            .plan(Platform::Instagram, MediaKind::Video)
            .unwrap_err();
        assert!(matches!(err, DownloadError::MissingCredential(_)));
    }

    #[test]
    fn override_headers_replace_base_values() {
        let base = StrategyBase {
            format: "best".into(),
            user_agent: Some("base-ua".into()),
            headers: vec![("Origin".into(), "https://a".into()), ("DNT".into(), "1".into())],
            cookies: None,
        };
        let o = StrategyOverrides {
            headers: vec![("origin", "https://b"), ("Referer", "https://r")],
            ..Default::default()
        };
        let s = o.resolve("t", &base);
        assert_eq!(s.format, "best");
        assert_eq!(s.user_agent.as_deref(), Some("base-ua"));
        assert_eq!(
            s.headers,
            vec![
                ("Origin".to_string(), "https://b".to_string()),
                ("DNT".to_string(), "1".to_string()),
                ("Referer".to_string(), "https://r".to_string()),
            ]
        );
    }

    #[test]
    fn args_carry_client_and_recode() {
        let plan = StrategyTable::default().plan(Platform::YouTube, MediaKind::Video).unwrap();
        let last = plan.last().unwrap().to_args("/tmp/x.%(ext)s");
        assert!(last.windows(2).any(|w| w[0] == "--extractor-args"
            && w[1] == "youtube:player_client=android;skip=dash,hls"));
        assert!(last.windows(2).any(|w| w[0] == "--recode-video" && w[1] == "mp4"));

        let first = plan[0].to_args("/tmp/x.%(ext)s");
        assert!(first.contains(&"youtube:player_client=mweb;skip=dash,hls;lang=en".to_string()));
        assert!(first.windows(2).any(|w| w[0] == "-o" && w[1] == "/tmp/x.%(ext)s"));
    }

    #[test]
    fn audio_plan_uses_audio_format() {
        let plan = StrategyTable::default().plan(Platform::YouTube, MediaKind::Audio).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|s| s.format == "bestaudio[ext=m4a]/bestaudio"));
        assert!(plan.iter().all(|s| !s.recode_to_mp4));
    }
}
