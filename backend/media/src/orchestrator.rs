//! Runs the ordered strategies for a request until one yields a file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use linkgrab_core::{MediaKind, Platform};
use thiserror::Error;
use tracing::{info, warn};

use crate::extractor::{ExtractError, Extractor};
use crate::strategy::StrategyTable;
use crate::temp_file::{OutputBase, PartialOutputGuard, TempMedia};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("temp directory unavailable: {0}")]
    TempDir(#[from] std::io::Error),

    #[error("{platform} extraction failed: {source}")]
    Extraction {
        platform: Platform,
        #[source]
        source: ExtractError,
    },

    #[error("{platform} extraction produced no output file")]
    EmptyOutput { platform: Platform },

    #[error("all {attempts} {platform} download methods failed")]
    AllMethodsFailed {
        platform: Platform,
        attempts: usize,
        /// Message of the last failed attempt.
        last: Option<String>,
    },
}

impl DownloadError {
    /// Text reported by the extraction tool, when the failure came from it.
    pub fn tool_message(&self) -> Option<&str> {
        match self {
            DownloadError::Extraction {
                source: ExtractError::Exit { stderr, .. },
                ..
            } => Some(stderr),
            DownloadError::AllMethodsFailed { last, .. } => last.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub temp_dir: PathBuf,
    /// Upper bound for a single strategy attempt.
    pub attempt_timeout: Duration,
    /// Pause between consecutive strategies.
    pub strategy_delay: Duration,
    pub instagram_cookies: Option<PathBuf>,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            temp_dir: std::env::temp_dir().join("linkgrab"),
            attempt_timeout: Duration::from_secs(300),
            strategy_delay: Duration::from_secs(2),
            instagram_cookies: None,
        }
    }
}

/// A successful download: the file plus which strategy produced it.
#[derive(Debug)]
pub struct DownloadOutcome {
    pub media: TempMedia,
    pub strategy: &'static str,
    pub attempts: usize,
}

pub struct Downloader {
    extractor: Arc<dyn Extractor>,
    table: StrategyTable,
    settings: DownloadSettings,
}

impl Downloader {
    pub fn new(extractor: Arc<dyn Extractor>, settings: DownloadSettings) -> Self {
        Self {
            extractor,
            table: StrategyTable::new(settings.instagram_cookies.clone()),
            settings,
        }
    }

    /// Try each strategy in order. Stops at the first attempt that leaves a
    /// non-empty file. Partial output of failed attempts is purged before the
    /// next one starts, so a failed download leaves nothing on disk.
    pub async fn download(
        &self,
        url: &str,
        platform: Platform,
        kind: MediaKind,
    ) -> Result<DownloadOutcome, DownloadError> {
        self.download_observed(url, platform, kind, |_, _| {}).await
    }

    /// Like [`Downloader::download`], calling `on_failure` with the strategy
    /// name after every failed attempt.
    pub async fn download_observed<F>(
        &self,
        url: &str,
        platform: Platform,
        kind: MediaKind,
        on_failure: F,
    ) -> Result<DownloadOutcome, DownloadError>
    where
        F: Fn(&'static str, &DownloadError) + Send + Sync,
    {
        let strategies = self.table.plan(platform, kind)?;
        tokio::fs::create_dir_all(&self.settings.temp_dir).await?;

        let base = OutputBase::new(&self.settings.temp_dir, platform);
        let template = base.template();
        let mut last_error = None;

        for (index, strategy) in strategies.iter().enumerate() {
            if index > 0 && !self.settings.strategy_delay.is_zero() {
                tokio::time::sleep(self.settings.strategy_delay).await;
            }
            let attempt = index + 1;
            info!(%platform, strategy = strategy.name, attempt, "Trying download strategy");

            let guard = PartialOutputGuard::new(&base);
            let result = tokio::time::timeout(
                self.settings.attempt_timeout,
                self.extractor.download(url, strategy, &template),
            )
            .await
            .unwrap_or_else(|_| Err(ExtractError::Timeout(self.settings.attempt_timeout.as_secs())));

            let error = match result {
                Ok(()) => match base.take_output() {
                    Some(media) => {
                        guard.disarm();
                        info!(
                            %platform,
                            strategy = strategy.name,
                            size = media.size(),
                            "Download succeeded"
                        );
                        return Ok(DownloadOutcome {
                            media,
                            strategy: strategy.name,
                            attempts: attempt,
                        });
                    }
                    None => DownloadError::EmptyOutput { platform },
                },
                Err(source) => DownloadError::Extraction { platform, source },
            };

            warn!(%platform, strategy = strategy.name, "Strategy failed: {}", error);
            on_failure(strategy.name, &error);
            drop(guard);
            last_error = Some(error);
        }

        match last_error {
            Some(error) if strategies.len() == 1 => Err(error),
            last => Err(DownloadError::AllMethodsFailed {
                platform,
                attempts: strategies.len(),
                last: last.map(|e| match e.tool_message() {
                    Some(msg) => msg.to_string(),
                    None => e.to_string(),
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{MediaMetadata, MetadataProfile};
    use crate::strategy::ExtractionStrategy;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails every strategy until `succeed_at` (1-based), then writes a file.
    struct ScriptedExtractor {
        succeed_at: Option<usize>,
        leave_partial: bool,
        write_empty: bool,
        attempted: Mutex<Vec<&'static str>>,
        started: Mutex<Vec<std::time::Instant>>,
    }

    impl ScriptedExtractor {
        fn new(succeed_at: Option<usize>) -> Self {
            Self {
                succeed_at,
                leave_partial: true,
                write_empty: false,
                attempted: Mutex::new(Vec::new()),
                started: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Extractor for ScriptedExtractor {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn download(
            &self,
            _url: &str,
            strategy: &ExtractionStrategy,
            output_template: &str,
        ) -> Result<(), ExtractError> {
            self.started.lock().unwrap().push(std::time::Instant::now());
            let attempt = {
                let mut attempted = self.attempted.lock().unwrap();
                attempted.push(strategy.name);
                attempted.len()
            };
            if Some(attempt) == self.succeed_at {
                let body: &[u8] = if self.write_empty { b"" } else { b"media" };
                std::fs::write(output_template.replace("%(ext)s", "mp4"), body)?;
                return Ok(());
            }
            if self.leave_partial {
                std::fs::write(output_template.replace("%(ext)s", "mp4.part"), b"half")?;
            }
            Err(ExtractError::Exit { code: Some(1), stderr: "blocked".into() })
        }

        async fn metadata(
            &self,
            _url: &str,
            _profile: &MetadataProfile,
        ) -> Result<MediaMetadata, ExtractError> {
            Ok(MediaMetadata::default())
        }
    }

    fn settings() -> DownloadSettings {
        DownloadSettings {
            temp_dir: std::env::temp_dir().join(format!("linkgrab-dl-{}", uuid::Uuid::new_v4())),
            attempt_timeout: Duration::from_secs(5),
            strategy_delay: Duration::ZERO,
            instagram_cookies: None,
        }
    }

    fn dir_is_empty(dir: &std::path::Path) -> bool {
        std::fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(true)
    }

    #[tokio::test]
    async fn youtube_falls_through_to_third_strategy() {
        let extractor = Arc::new(ScriptedExtractor::new(Some(3)));
        let settings = settings();
        let dir = settings.temp_dir.clone();
        let downloader = Downloader::new(extractor.clone(), settings);

        let outcome = downloader
            .download("https://youtu.be/x", Platform::YouTube, MediaKind::Video)
            .await
            .unwrap();
        assert_eq!(outcome.strategy, "ios");
        assert_eq!(outcome.attempts, 3);
        assert_eq!(
            *extractor.attempted.lock().unwrap(),
            ["mobile-web", "android-tv", "ios"]
        );
        assert_eq!(outcome.media.extension(), "mp4");

        drop(outcome);
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn fourth_strategy_wins_and_later_ones_never_run() {
        let extractor = Arc::new(ScriptedExtractor::new(Some(4)));
        let mut settings = settings();
        settings.strategy_delay = Duration::from_millis(20);
        let dir = settings.temp_dir.clone();
        let downloader = Downloader::new(extractor.clone(), settings);

        let called = std::time::Instant::now();
        let outcome = downloader
            .download("https://youtu.be/x", Platform::YouTube, MediaKind::Video)
            .await
            .unwrap();
        assert_eq!(outcome.strategy, "embedded-player");
        assert_eq!(outcome.attempts, 4);
        assert_eq!(
            *extractor.attempted.lock().unwrap(),
            ["mobile-web", "android-tv", "ios", "embedded-player"]
        );

        let started = extractor.started.lock().unwrap().clone();
        assert_eq!(started.len(), 4);
        assert!(started[0].duration_since(called) < Duration::from_millis(20));
        for pair in started.windows(2) {
            assert!(pair[1].duration_since(pair[0]) >= Duration::from_millis(20));
        }

        drop(outcome);
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn exhausted_strategies_report_all_failed_and_clean_up() {
        let extractor = Arc::new(ScriptedExtractor::new(None));
        let settings = settings();
        let dir = settings.temp_dir.clone();
        let downloader = Downloader::new(extractor.clone(), settings);

        let err = downloader
            .download("https://youtu.be/x", Platform::YouTube, MediaKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::AllMethodsFailed { attempts: 6, .. }));
        assert_eq!(err.tool_message(), Some("blocked"));
        assert_eq!(extractor.attempted.lock().unwrap().len(), 6);
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn observer_sees_each_failed_strategy() {
        let extractor = Arc::new(ScriptedExtractor::new(Some(2)));
        let downloader = Downloader::new(extractor, settings());
        let failed = Mutex::new(Vec::new());

        let outcome = downloader
            .download_observed(
                "https://youtu.be/x",
                Platform::YouTube,
                MediaKind::Video,
                |strategy, e| failed.lock().unwrap().push((strategy, e.to_string())),
            )
            .await
            .unwrap();
        assert_eq!(outcome.strategy, "android-tv");
        let failed = failed.into_inner().unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, "mobile-web");
    }

    #[tokio::test]
    async fn single_strategy_failure_keeps_its_cause() {
        let extractor = Arc::new(ScriptedExtractor::new(None));
        let downloader = Downloader::new(extractor, settings());

        let err = downloader
            .download("https://tiktok.com/@a/video/1", Platform::TikTok, MediaKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::Extraction { platform: Platform::TikTok, .. }));
    }

    #[tokio::test]
    async fn zero_byte_output_counts_as_failure() {
        let mut scripted = ScriptedExtractor::new(Some(1));
        scripted.write_empty = true;
        let settings = settings();
        let dir = settings.temp_dir.clone();
        let downloader = Downloader::new(Arc::new(scripted), settings);

        let err = downloader
            .download("https://tiktok.com/@a/video/1", Platform::TikTok, MediaKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::EmptyOutput { .. }));
        assert!(dir_is_empty(&dir));
    }

    #[tokio::test]
    async fn instagram_without_cookies_never_attempts() {
        let extractor = Arc::new(ScriptedExtractor::new(Some(1)));
        let downloader = Downloader::new(extractor.clone(), settings());

        let err = downloader
            .download("https://instagram.com/reel/1", Platform::Instagram, MediaKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::MissingCredential(_)));
        assert!(extractor.attempted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn slow_attempt_times_out() {
        struct Stalled;

        #[async_trait]
        impl Extractor for Stalled {
            fn name(&self) -> &str {
                "stalled"
            }
            async fn download(
                &self,
                _url: &str,
                _strategy: &ExtractionStrategy,
                _output_template: &str,
            ) -> Result<(), ExtractError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(())
            }
            async fn metadata(
                &self,
                _url: &str,
                _profile: &MetadataProfile,
            ) -> Result<MediaMetadata, ExtractError> {
                Ok(MediaMetadata::default())
            }
        }

        let mut settings = settings();
        settings.attempt_timeout = Duration::from_millis(20);
        let downloader = Downloader::new(Arc::new(Stalled), settings);
        let err = downloader
            .download("https://tiktok.com/@a/video/1", Platform::TikTok, MediaKind::Video)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DownloadError::Extraction { source: ExtractError::Timeout(_), .. }
        ));
    }
}
