//! Per-request lifecycle: classified link → (format choice) → download →
//! title → upload, with one status message overwritten along the way.

use std::sync::Arc;

use linkgrab_core::{Button, CallbackPayload, DownloadRequest, Keyboard, MediaKind, Platform, UserRef};
use linkgrab_i18n::{Catalog, Category, Locale};
use linkgrab_infra::{LanguageStore, StatsStore};
use linkgrab_logging::{RequestEvent, RequestEventLogger};
use linkgrab_media::{DownloadError, Downloader, TitleExtractor};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::pending::PendingSelections;
use crate::pipeline::UploadPipeline;
use crate::status::StatusMessage;
use crate::transport::{ChatTransport, MessageRef};

/// Telegram bots may not upload more than this.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Everything a request needs, shared by all requests.
pub struct CoordinatorDeps {
    pub transport: Arc<dyn ChatTransport>,
    pub catalog: Arc<Catalog>,
    pub languages: Arc<LanguageStore>,
    pub stats: Arc<StatsStore>,
    pub downloader: Arc<Downloader>,
    pub titles: Arc<TitleExtractor>,
    pub pipeline: UploadPipeline,
    pub pending: PendingSelections,
    pub shutdown: CancellationToken,
    pub max_upload_bytes: u64,
}

pub struct LinkCoordinator {
    deps: CoordinatorDeps,
}

impl LinkCoordinator {
    pub fn new(deps: CoordinatorDeps) -> Arc<Self> {
        Arc::new(Self { deps })
    }

    pub fn spawn_link(self: &Arc<Self>, user: UserRef, origin: MessageRef, url: String, platform: Platform) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.handle_link(user, origin, &url, platform).await })
    }

    pub fn spawn_format_choice(
        self: &Arc<Self>,
        callback_id: String,
        user: UserRef,
        chat_id: i64,
        kind: MediaKind,
        origin_message_id: i32,
    ) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            this.handle_format_choice(&callback_id, user, chat_id, kind, origin_message_id).await
        })
    }

    /// Entry for a message carrying a supported link. YouTube links stop at
    /// the format prompt; the rest go straight to download.
    pub async fn handle_link(&self, user: UserRef, origin: MessageRef, url: &str, platform: Platform) {
        let d = &self.deps;
        d.stats.add_user(user.id).await;
        let locale = d.languages.get(user.id).await;
        let request = DownloadRequest::new(user, origin.chat_id, url, platform);

        RequestEventLogger::log(request.id, RequestEvent::Received {
            user_id: request.user.id,
            chat_id: request.chat_id,
            url: request.url.clone(),
        });
        RequestEventLogger::log(request.id, RequestEvent::Classified { platform: platform.slug().into() });

        if platform == Platform::YouTube {
            self.prompt_format(request, origin, locale).await;
            return;
        }

        let status = StatusMessage::new(d.transport.clone(), request.chat_id);
        self.run(request, locale, status).await;
    }

    async fn prompt_format(&self, request: DownloadRequest, origin: MessageRef, locale: Locale) {
        let d = &self.deps;
        let button = |key: &str, kind: MediaKind| {
            Button::new(
                d.catalog.text(locale, Category::Youtube, key),
                CallbackPayload::YoutubeFormat { kind, message_id: origin.message_id }.encode(),
            )
        };
        let keyboard = Keyboard {
            rows: vec![vec![button("video_button", MediaKind::Video), button("audio_button", MediaKind::Audio)]],
        };
        let text = d.catalog.text(locale, Category::Youtube, "choose_format");

        match d.transport.send_text(request.chat_id, &text, Some(&keyboard)).await {
            Ok(prompt) => {
                RequestEventLogger::log(request.id, RequestEvent::AwaitingFormat);
                d.pending.insert(origin, request, prompt).await;
            }
            Err(e) => error!(request_id = %request.id, "Failed to send format prompt: {:#}", e),
        }
    }

    /// Entry for a format button tap. The prompt message becomes the
    /// request's status message.
    pub async fn handle_format_choice(
        &self,
        callback_id: &str,
        user: UserRef,
        chat_id: i64,
        kind: MediaKind,
        origin_message_id: i32,
    ) {
        let d = &self.deps;
        let locale = d.languages.get(user.id).await;

        let Some(selection) = d.pending.take(chat_id, origin_message_id, user.id).await else {
            let expired = d.catalog.text(locale, Category::Youtube, "selection_expired");
            if let Err(e) = d.transport.answer_callback(callback_id, Some(&expired), true).await {
                warn!(user_id = user.id, "Failed to answer callback: {:#}", e);
            }
            return;
        };
        if let Err(e) = d.transport.answer_callback(callback_id, None, false).await {
            warn!(user_id = user.id, "Failed to answer callback: {:#}", e);
        }

        let request = selection.request.with_media_kind(kind);
        let status = StatusMessage::adopt(d.transport.clone(), selection.prompt);
        self.run(request, locale, status).await;
    }

    async fn run(&self, request: DownloadRequest, locale: Locale, mut status: StatusMessage) {
        let d = &self.deps;
        let platform = request.platform;

        status.show(&d.catalog.text(locale, Category::Status, "processing")).await;
        let platform_name = d.catalog.text(locale, Category::Platforms, platform.slug());
        status
            .show(&d.catalog.render(locale, Category::Status, "downloading", &[("platform", &platform_name)]))
            .await;

        let request_id = request.id;
        let on_failure = move |strategy: &'static str, e: &DownloadError| {
            RequestEventLogger::log(
                request_id,
                RequestEvent::StrategyFailed { strategy: strategy.to_string(), error: e.to_string() },
            )
        };
        let result = tokio::select! {
            _ = d.shutdown.cancelled() => return self.abandon(&request),
            r = d.downloader.download_observed(&request.url, platform, request.media_kind, on_failure) => r,
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    request_id = %request.id,
                    user_id = request.user.id,
                    username = %request.user.handle(),
                    %platform,
                    "Download failed: {}",
                    e
                );
                RequestEventLogger::log(request.id, RequestEvent::Failed { reason: e.to_string() });
                status.show(&self.failure_text(locale, platform, &e)).await;
                return;
            }
        };
        RequestEventLogger::log(request.id, RequestEvent::Extracted {
            strategy: outcome.strategy.to_string(),
            attempts: outcome.attempts,
            bytes: outcome.media.size(),
        });

        let media = outcome.media;
        if media.size() > d.max_upload_bytes {
            warn!(request_id = %request.id, bytes = media.size(), "File exceeds upload limit");
            RequestEventLogger::log(request.id, RequestEvent::Failed { reason: "file too large".into() });
            if let Err(e) = media.remove().await {
                warn!(request_id = %request.id, "Failed to delete temp file: {}", e);
            }
            status.show(&d.catalog.text(locale, Category::Status, "file_too_large")).await;
            return;
        }

        let title = tokio::select! {
            _ = d.shutdown.cancelled() => return self.abandon(&request),
            t = d.titles.extract_title(&request.url, platform) => t,
        };

        let bytes = media.size();
        let delivered = tokio::select! {
            _ = d.shutdown.cancelled() => return self.abandon(&request),
            r = d.pipeline.deliver(&request, media, &title, locale, &mut status) => r,
        };
        match delivered {
            Ok(()) => RequestEventLogger::log(request.id, RequestEvent::Delivered { bytes }),
            Err(e) => {
                error!(
                    request_id = %request.id,
                    user_id = request.user.id,
                    username = %request.user.handle(),
                    "Upload failed: {:#}",
                    e
                );
                RequestEventLogger::log(request.id, RequestEvent::Failed { reason: format!("{e:#}") });
                let error = e.to_string();
                status
                    .show(&d.catalog.render(locale, Category::Status, "error", &[("error", &error)]))
                    .await;
            }
        }
    }

    fn abandon(&self, request: &DownloadRequest) {
        info!(request_id = %request.id, "Shutdown requested, abandoning request");
        RequestEventLogger::log(request.id, RequestEvent::Abandoned);
    }

    /// YouTube failures get the restriction notices; everything else the
    /// generic download failure.
    fn failure_text(&self, locale: Locale, platform: Platform, err: &DownloadError) -> String {
        let catalog = &self.deps.catalog;
        let youtube_failure = platform == Platform::YouTube
            && matches!(err, DownloadError::Extraction { .. } | DownloadError::EmptyOutput { .. } | DownloadError::AllMethodsFailed { .. });
        if !youtube_failure {
            return catalog.text(locale, Category::Status, "download_failed");
        }

        let detail = err.tool_message().unwrap_or_default().to_lowercase();
        let key = if detail.contains("sign in") {
            "signin_required"
        } else if detail.contains("requested format is not available") {
            "format_unavailable"
        } else {
            "restrictions"
        };
        catalog.text(locale, Category::Youtube, key)
    }
}
