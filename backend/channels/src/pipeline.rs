//! Delivers a downloaded file: caption, upload with progress, cleanup,
//! statistics and the admin notice.

use std::sync::Arc;

use anyhow::Result;
use linkgrab_core::DownloadRequest;
use linkgrab_i18n::{format_size, Catalog, Locale};
use linkgrab_infra::StatsStore;
use linkgrab_media::{delivery_kind, TempMedia};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::caption::{build_caption, promo_footer};
use crate::notify::AdminNotifier;
use crate::progress::{progress_text, spawn_progress_editor};
use crate::status::StatusMessage;
use crate::transport::{ChatTransport, MediaUpload};

pub struct UploadPipeline {
    transport: Arc<dyn ChatTransport>,
    catalog: Arc<Catalog>,
    stats: Arc<StatsStore>,
    notifier: Arc<AdminNotifier>,
    promo_channels: String,
}

impl UploadPipeline {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        catalog: Arc<Catalog>,
        stats: Arc<StatsStore>,
        notifier: Arc<AdminNotifier>,
        promo_channels: String,
    ) -> Self {
        Self { transport, catalog, stats, notifier, promo_channels }
    }

    /// Upload `media` to the requesting chat and delete it afterwards,
    /// whatever the upload outcome. On success the status message is
    /// removed; on failure it is left for the caller to overwrite.
    pub async fn deliver(
        &self,
        request: &DownloadRequest,
        media: TempMedia,
        title: &str,
        locale: Locale,
        status: &mut StatusMessage,
    ) -> Result<()> {
        let size = media.size();
        let size_label = format_size(size, locale);
        status.show(&progress_text(&self.catalog, locale, 0, &size_label)).await;

        let promo = promo_footer(&self.catalog, locale, &self.promo_channels);
        let caption = build_caption(request.platform, title, &size_label, &promo, locale.code());

        let (tx, rx) = mpsc::unbounded_channel();
        let editor = status.message().map(|message| {
            spawn_progress_editor(
                self.transport.clone(),
                self.catalog.clone(),
                message,
                locale,
                size_label.clone(),
                rx,
            )
        });

        let upload = MediaUpload {
            path: media.path().to_path_buf(),
            file_name: media.file_name(),
            kind: delivery_kind(media.path(), request.media_kind),
            caption,
            size,
            progress: editor.is_some().then_some(tx),
        };
        let sent = self.transport.send_media(request.chat_id, upload).await;

        // the upload dropped its sender, so the editor drains and stops
        if let Some(editor) = editor {
            if let Err(e) = editor.await {
                warn!("Progress editor ended abnormally: {}", e);
            }
        }

        if let Err(e) = media.remove().await {
            warn!(request_id = %request.id, "Failed to delete temp file: {}", e);
        }
        sent?;

        self.stats.add_download(request.platform).await;
        status.clear().await;
        self.notifier
            .download_completed(&request.user, request.platform, &request.url, title)
            .await;
        info!(
            request_id = %request.id,
            user_id = request.user.id,
            platform = %request.platform,
            bytes = size,
            "Media delivered"
        );
        Ok(())
    }
}
