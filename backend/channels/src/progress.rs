//! Upload progress: a counting reader feeding a throttled status editor.

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use linkgrab_i18n::{progress_bar, Catalog, Category, Locale};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::transport::{ChatTransport, MessageRef, ProgressSender, UploadProgress};

/// Wraps a reader and reports cumulative bytes read.
pub struct ProgressReader<R> {
    inner: R,
    sent: u64,
    total: u64,
    tx: Option<ProgressSender>,
}

impl<R> ProgressReader<R> {
    pub fn new(inner: R, total: u64, tx: Option<ProgressSender>) -> Self {
        Self { inner, sent: 0, total, tx }
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for ProgressReader<R> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let before = buf.filled().len();
        match Pin::new(&mut self.inner).poll_read(cx, buf) {
            Poll::Ready(Ok(())) => {
                let read = (buf.filled().len() - before) as u64;
                if read > 0 {
                    self.sent += read;
                    let progress = UploadProgress { sent: self.sent, total: self.total };
                    if let Some(tx) = &self.tx {
                        // receiver gone only means nobody is watching
                        let _ = tx.send(progress);
                    }
                }
                Poll::Ready(Ok(()))
            }
            other => other,
        }
    }
}

/// Decides which progress reports deserve a status edit: each multiple of
/// ten percent, at most once, never going backwards.
#[derive(Debug, Default)]
pub struct ProgressThrottle {
    last: Option<u8>,
}

impl ProgressThrottle {
    pub fn observe(&mut self, progress: UploadProgress) -> Option<u8> {
        if progress.total == 0 {
            return None;
        }
        let pct = (progress.sent.saturating_mul(100) / progress.total).min(100) as u8;
        let step = pct - pct % 10;
        if step == 0 || self.last.is_some_and(|last| step <= last) {
            return None;
        }
        self.last = Some(step);
        Some(step)
    }
}

/// `uploading` line, bar and formatted size.
pub fn progress_text(catalog: &Catalog, locale: Locale, percentage: u8, size_label: &str) -> String {
    let pct = percentage.to_string();
    format!(
        "{}\n{}\n📁 {}",
        catalog.render(locale, Category::Progress, "uploading", &[("percentage", &pct)]),
        progress_bar(percentage),
        size_label
    )
}

/// Consume progress reports and edit `status` at throttled steps. Edit
/// failures are logged and never stop the upload.
pub fn spawn_progress_editor(
    transport: Arc<dyn ChatTransport>,
    catalog: Arc<Catalog>,
    status: MessageRef,
    locale: Locale,
    size_label: String,
    mut rx: mpsc::UnboundedReceiver<UploadProgress>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut throttle = ProgressThrottle::default();
        while let Some(progress) = rx.recv().await {
            let Some(step) = throttle.observe(progress) else {
                continue;
            };
            let text = progress_text(&catalog, locale, step, &size_label);
            if let Err(e) = transport.edit_text(status, &text, None).await {
                debug!(chat_id = status.chat_id, step, "Progress edit failed: {:#}", e);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    fn p(sent: u64, total: u64) -> UploadProgress {
        UploadProgress { sent, total }
    }

    #[test]
    fn throttle_emits_each_tenth_once() {
        let mut throttle = ProgressThrottle::default();
        let emitted: Vec<u8> = (0..=1000u64)
            .step_by(7)
            .chain(std::iter::once(1000))
            .filter_map(|sent| throttle.observe(p(sent, 1000)))
            .collect();
        assert_eq!(emitted, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn throttle_handles_jumps_and_zero_total() {
        let mut throttle = ProgressThrottle::default();
        assert_eq!(throttle.observe(p(5, 0)), None);
        assert_eq!(throttle.observe(p(35, 100)), Some(30));
        assert_eq!(throttle.observe(p(39, 100)), None);
        assert_eq!(throttle.observe(p(100, 100)), Some(100));
        assert_eq!(throttle.observe(p(100, 100)), None);
    }

    #[tokio::test]
    async fn reader_reports_cumulative_bytes() {
        let data = vec![7u8; 10_000];
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut reader = ProgressReader::new(&data[..], data.len() as u64, Some(tx));
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        drop(reader);

        let mut last = None;
        while let Some(progress) = rx.recv().await {
            if let Some(UploadProgress { sent, .. }) = last {
                assert!(progress.sent > sent);
            }
            last = Some(progress);
        }
        assert_eq!(last, Some(p(10_000, 10_000)));
        assert_eq!(out, data);
    }

    #[test]
    fn progress_text_has_bar_and_size() {
        let catalog = Catalog::validated().unwrap();
        let text = progress_text(&catalog, Locale::En, 50, "4.2 MB");
        assert_eq!(
            text,
            "📤 Uploading to Telegram: 50%\n[█████░░░░░] 50%\n📁 4.2 MB"
        );
    }
}
