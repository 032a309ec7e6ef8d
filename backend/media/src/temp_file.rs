//! Temporary download outputs.
//!
//! Every request gets a unique base path `<dir>/<platform>_<ms>_<pid>_<seq>`.
//! The extraction tool appends the real extension, so the produced file is
//! discovered afterwards by globbing `<base>.*`. A finished file is owned by
//! exactly one [`TempMedia`], which deletes it either explicitly through
//! [`TempMedia::remove`] or on drop.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use linkgrab_core::Platform;
use tracing::{debug, warn};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Suffixes the extraction tool uses for in-progress fragments.
const PARTIAL_SUFFIXES: &[&str] = &["part", "ytdl", "temp", "tmp"];

/// Unique, not-yet-existing base path for one download.
#[derive(Debug, Clone)]
pub struct OutputBase {
    base: PathBuf,
}

impl OutputBase {
    pub fn new(dir: &Path, platform: Platform) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let name = format!("{}_{}_{}_{}", platform.slug(), millis, std::process::id(), seq);
        Self { base: dir.join(name) }
    }

    pub fn path(&self) -> &Path {
        &self.base
    }

    /// Output template handed to the extraction tool.
    pub fn template(&self) -> String {
        format!("{}.%(ext)s", self.base.display())
    }

    fn matching(&self) -> Vec<PathBuf> {
        let pattern = format!(
            "{}.*",
            glob::Pattern::escape(&self.base.display().to_string())
        );
        match glob::glob(&pattern) {
            Ok(paths) => paths.filter_map(Result::ok).collect(),
            Err(e) => {
                warn!("Invalid output pattern {}: {}", pattern, e);
                Vec::new()
            }
        }
    }

    /// Claim the finished, non-empty output file, if any. A merged
    /// `<base>.<ext>` wins over format fragments such as `<base>.f18.mp4`;
    /// every other file under the base is deleted.
    pub fn take_output(&self) -> Option<TempMedia> {
        let mut candidates: Vec<(bool, PathBuf, u64)> = self
            .matching()
            .into_iter()
            .filter(|p| !is_partial(p))
            .filter_map(|p| {
                let meta = std::fs::metadata(&p).ok()?;
                (meta.is_file() && meta.len() > 0).then(|| (self.is_fragment(&p), p, meta.len()))
            })
            .collect();
        candidates.sort();
        let (_, path, size) = candidates.into_iter().next()?;

        for sibling in self.matching().into_iter().filter(|p| *p != path) {
            if let Err(e) = std::fs::remove_file(&sibling) {
                debug!("Could not remove {}: {}", sibling.display(), e);
            }
        }
        Some(TempMedia::new(path, size))
    }

    /// True for `<base>.<format id>.<ext>` outputs.
    fn is_fragment(&self, path: &Path) -> bool {
        let base = self.base.display().to_string();
        path.display()
            .to_string()
            .strip_prefix(&base)
            .map(|rest| rest.matches('.').count() > 1)
            .unwrap_or(false)
    }

    /// Delete everything written under this base. Returns the number removed.
    pub fn purge(&self) -> usize {
        let mut removed = 0;
        for path in self.matching() {
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => debug!("Could not remove {}: {}", path.display(), e),
            }
        }
        removed
    }
}

fn is_partial(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PARTIAL_SUFFIXES.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Purges a base on drop unless disarmed. Covers every early exit of an attempt.
pub struct PartialOutputGuard<'a> {
    base: Option<&'a OutputBase>,
}

impl<'a> PartialOutputGuard<'a> {
    pub fn new(base: &'a OutputBase) -> Self {
        Self { base: Some(base) }
    }

    pub fn disarm(mut self) {
        self.base = None;
    }
}

impl Drop for PartialOutputGuard<'_> {
    fn drop(&mut self) {
        if let Some(base) = self.base.take() {
            let removed = base.purge();
            if removed > 0 {
                debug!("Purged {} partial output(s) for {}", removed, base.path().display());
            }
        }
    }
}

/// A downloaded file on local disk, deleted exactly once.
#[derive(Debug)]
pub struct TempMedia {
    path: Option<PathBuf>,
    size: u64,
}

impl TempMedia {
    fn new(path: PathBuf, size: u64) -> Self {
        Self { path: Some(path), size }
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn extension(&self) -> &str {
        self.path().extension().and_then(|e| e.to_str()).unwrap_or("")
    }

    pub fn file_name(&self) -> String {
        self.path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Delete the file now. Consuming `self` rules out a second deletion.
    pub async fn remove(mut self) -> std::io::Result<()> {
        match self.path.take() {
            Some(path) => match tokio::fs::remove_file(&path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e),
            },
            None => Ok(()),
        }
    }
}

impl Drop for TempMedia {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            if let Err(e) = std::fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to delete temp file {}: {}", path.display(), e);
                }
            }
        }
    }
}
