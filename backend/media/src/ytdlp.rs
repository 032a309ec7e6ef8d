//! [`Extractor`] backed by the `yt-dlp` command-line tool.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::extractor::{ExtractError, Extractor, MediaMetadata, MetadataProfile};
use crate::strategy::ExtractionStrategy;

/// Keep error messages readable: only the tail of stderr is reported.
const STDERR_TAIL_LINES: usize = 5;

pub struct YtDlp {
    binary: PathBuf,
}

impl YtDlp {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    /// Spawn the tool and collect its output. The child is killed if the
    /// returned future is dropped (e.g. by a caller-side timeout).
    async fn run(&self, args: Vec<String>, url: &str) -> Result<Vec<u8>, ExtractError> {
        debug!(binary = %self.binary.display(), ?args, "Spawning extraction tool");

        let output = Command::new(&self.binary)
            .args(&args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: Vec<&str> = stderr
            .lines()
            .filter(|l| !l.trim().is_empty())
            .rev()
            .take(STDERR_TAIL_LINES)
            .collect();
        let tail = tail.into_iter().rev().collect::<Vec<_>>().join("\n");
        warn!(code = ?output.status.code(), "Extraction tool failed: {}", tail);

        Err(ExtractError::Exit {
            code: output.status.code(),
            stderr: tail,
        })
    }
}

#[async_trait]
impl Extractor for YtDlp {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn download(
        &self,
        url: &str,
        strategy: &ExtractionStrategy,
        output_template: &str,
    ) -> Result<(), ExtractError> {
        self.run(strategy.to_args(output_template), url).await?;
        Ok(())
    }

    async fn metadata(
        &self,
        url: &str,
        profile: &MetadataProfile,
    ) -> Result<MediaMetadata, ExtractError> {
        let stdout = self.run(profile.to_args(), url).await?;
        serde_json::from_slice(&stdout).map_err(|e| ExtractError::InvalidOutput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let tool = YtDlp::new("/nonexistent/linkgrab/yt-dlp");
        let err = tool
            .metadata("https://youtu.be/x", &MetadataProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_reports_stderr_tail() {
        // `sh -c` treats the first trailing argument as $0, so the script ignores the rest.
        let tool = YtDlp::new("sh");
        let err = tool
            .run(
                vec!["-c".into(), "echo one >&2; echo two >&2; exit 3".into()],
                "https://youtu.be/x",
            )
            .await
            .unwrap_err();
        match err {
            ExtractError::Exit { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "one\ntwo");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
