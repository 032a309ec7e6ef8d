//! In-memory transport for tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use linkgrab_core::Keyboard;
use linkgrab_i18n::Catalog;
use linkgrab_infra::{LanguageStore, StatsStore};
use linkgrab_media::{
    DeliveryKind, DownloadSettings, Downloader, ExtractError, ExtractionStrategy, Extractor,
    MediaMetadata, MetadataProfile, TitleExtractor,
};
use tokio_util::sync::CancellationToken;

use crate::coordinator::{CoordinatorDeps, LinkCoordinator, DEFAULT_MAX_UPLOAD_BYTES};
use crate::notify::AdminNotifier;
use crate::pending::PendingSelections;
use crate::pipeline::UploadPipeline;
use crate::router::{InboundRouter, RouterDeps};
use crate::transport::{ChatTransport, MediaUpload, MessageRef, UploadProgress};

pub const ADMIN_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Text { chat_id: i64, message_id: i32, text: String, keyboard: Option<Keyboard> },
    Edit { message: MessageRef, text: String, keyboard: Option<Keyboard> },
    Delete(MessageRef),
    Media { chat_id: i64, file_name: String, kind: DeliveryKind, caption: String, file_existed: bool },
    Typing(i64),
    Answer { callback_id: String, text: Option<String>, alert: bool },
}

pub struct RecordingTransport {
    log: Mutex<Vec<Recorded>>,
    next_id: AtomicI32,
    fail_media: AtomicBool,
    fail_edits: AtomicBool,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1000),
            fail_media: AtomicBool::new(false),
            fail_edits: AtomicBool::new(false),
        }
    }
}

impl RecordingTransport {
    pub fn log(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn fail_media(&self) {
        self.fail_media.store(true, Ordering::SeqCst);
    }

    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    /// Every text that was sent or written into an edit, in order.
    pub fn texts(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .filter_map(|r| match r {
                Recorded::Text { text, .. } | Recorded::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: Recorded) {
        self.log.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<MessageRef> {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.push(Recorded::Text {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(MessageRef { chat_id, message_id })
    }

    async fn edit_text(&self, message: MessageRef, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        if self.fail_edits.load(Ordering::SeqCst) {
            bail!("message to edit not found");
        }
        self.push(Recorded::Edit { message, text: text.to_string(), keyboard: keyboard.cloned() });
        Ok(())
    }

    async fn delete(&self, message: MessageRef) -> Result<()> {
        self.push(Recorded::Delete(message));
        Ok(())
    }

    async fn send_media(&self, chat_id: i64, upload: MediaUpload) -> Result<()> {
        self.push(Recorded::Media {
            chat_id,
            file_name: upload.file_name.clone(),
            kind: upload.kind,
            caption: upload.caption.clone(),
            file_existed: upload.path.is_file(),
        });
        if let Some(tx) = &upload.progress {
            for step in 1..=20u64 {
                let _ = tx.send(UploadProgress { sent: upload.size * step / 20, total: upload.size });
            }
        }
        if self.fail_media.load(Ordering::SeqCst) {
            bail!("Request Entity Too Large");
        }
        Ok(())
    }

    async fn typing(&self, chat_id: i64) -> Result<()> {
        self.push(Recorded::Typing(chat_id));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>, alert: bool) -> Result<()> {
        self.push(Recorded::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            alert,
        });
        Ok(())
    }
}

/// Fails each strategy until `succeed_at` (1-based), then writes a file.
pub struct ScriptedExtractor {
    pub succeed_at: Option<usize>,
    pub stderr: String,
    pub title: Option<String>,
    pub body: Vec<u8>,
    pub extension: &'static str,
    pub hang: bool,
    attempts: Mutex<Vec<&'static str>>,
}

impl ScriptedExtractor {
    pub fn succeeding_at(attempt: usize) -> Self {
        Self {
            succeed_at: Some(attempt),
            stderr: "ERROR: blocked".into(),
            title: Some("Cat video".into()),
            body: b"media-bytes".to_vec(),
            extension: "mp4",
            hang: false,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(stderr: &str) -> Self {
        Self {
            succeed_at: None,
            stderr: stderr.into(),
            ..Self::succeeding_at(0)
        }
    }

    pub fn attempts(&self) -> Vec<&'static str> {
        self.attempts.lock().unwrap().clone()
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
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(strategy.name);
            attempts.len()
        };
        if self.hang {
            std::fs::write(output_template.replace("%(ext)s", "mp4.part"), b"partial")?;
            std::future::pending::<()>().await;
        }
        if Some(attempt) == self.succeed_at {
            std::fs::write(output_template.replace("%(ext)s", self.extension), &self.body)?;
            return Ok(());
        }
        Err(ExtractError::Exit { code: Some(1), stderr: self.stderr.clone() })
    }

    async fn metadata(&self, _url: &str, _profile: &MetadataProfile) -> Result<MediaMetadata, ExtractError> {
        match &self.title {
            Some(title) => Ok(MediaMetadata { title: Some(title.clone()), ..Default::default() }),
            None => Err(ExtractError::InvalidOutput("no metadata".into())),
        }
    }
}

/// Fully wired coordinator and router over in-memory fakes and a scratch
/// directory, removed on drop.
pub struct Harness {
    pub transport: Arc<RecordingTransport>,
    pub extractor: Arc<ScriptedExtractor>,
    pub catalog: Arc<Catalog>,
    pub languages: Arc<LanguageStore>,
    pub stats: Arc<StatsStore>,
    pub coordinator: Arc<LinkCoordinator>,
    pub router: InboundRouter,
    pub shutdown: CancellationToken,
    pub dir: PathBuf,
}

impl Harness {
    pub async fn new(extractor: ScriptedExtractor) -> Self {
        Self::with_limit(extractor, DEFAULT_MAX_UPLOAD_BYTES).await
    }

    pub async fn with_limit(extractor: ScriptedExtractor, max_upload_bytes: u64) -> Self {
        let dir = std::env::temp_dir().join(format!("linkgrab-channels-{}", uuid::Uuid::new_v4()));
        let transport = Arc::new(RecordingTransport::default());
        let extractor = Arc::new(extractor);
        let catalog = Arc::new(Catalog::validated().unwrap());
        let languages = Arc::new(LanguageStore::open(dir.join("languages.json")).await);
        let stats = Arc::new(StatsStore::open(dir.join("stats.json"), None).await);
        let shutdown = CancellationToken::new();

        let settings = DownloadSettings {
            temp_dir: dir.join("tmp"),
            attempt_timeout: Duration::from_secs(5),
            strategy_delay: Duration::ZERO,
            instagram_cookies: None,
        };
        let downloader = Arc::new(Downloader::new(extractor.clone(), settings));
        let titles = Arc::new(TitleExtractor::new(extractor.clone(), Duration::from_secs(5)));
        let notifier = Arc::new(AdminNotifier::new(transport.clone(), Some(ADMIN_ID), 4));
        let pipeline = UploadPipeline::new(
            transport.clone(),
            catalog.clone(),
            stats.clone(),
            notifier.clone(),
            "@one | @two".into(),
        );

        let coordinator = LinkCoordinator::new(CoordinatorDeps {
            transport: transport.clone(),
            catalog: catalog.clone(),
            languages: languages.clone(),
            stats: stats.clone(),
            downloader,
            titles,
            pipeline,
            pending: PendingSelections::default(),
            shutdown: shutdown.clone(),
            max_upload_bytes,
        });

        let router = InboundRouter::new(RouterDeps {
            transport: transport.clone(),
            catalog: catalog.clone(),
            languages: languages.clone(),
            stats: stats.clone(),
            dispatcher: linkgrab_commands::build_dispatcher(catalog.clone(), stats.clone()),
            coordinator: coordinator.clone(),
            notifier,
            admins: vec![ADMIN_ID],
            shutdown: shutdown.clone(),
        });

        Self { transport, extractor, catalog, languages, stats, coordinator, router, shutdown, dir }
    }

    /// Files left in the download directory.
    pub fn temp_files(&self) -> usize {
        std::fs::read_dir(self.dir.join("tmp"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
