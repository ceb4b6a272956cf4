//! Optional refinement through an external text-polishing tool
//!
//! Refinement is a capability, not a dependency: anything implementing
//! [`Refiner`] can be plugged in, and [`refine_or_strip`] falls back to the
//! local [`strip_markdown`] pipeline whenever the refiner fails.

use std::future::Future;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::strip::{strip_markdown, MarkupOptions};

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("no refine command configured (set refine.command or CLEANDRAFT_REFINE_COMMAND)")]
    NotConfigured,
    #[error("failed to start refine command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("refine command I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("refine command exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },
    #[error("refine command produced no output")]
    EmptyOutput,
}

/// Turns raw text into polished text, or fails
pub trait Refiner {
    fn refine(&self, text: &str) -> impl Future<Output = Result<String, RefineError>> + Send;
}

/// Where a piece of text is in the clean/refine cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Idle,
    Processing,
    Completed,
    Error,
}

/// Result of [`refine_or_strip`]: always usable text, plus how it was made
#[derive(Debug)]
pub struct RefineOutcome {
    pub text: String,
    pub status: ProcessingStatus,
    /// Why the refiner was bypassed, when it was
    pub error: Option<RefineError>,
}

impl RefineOutcome {
    pub fn fell_back(&self) -> bool {
        self.status == ProcessingStatus::Error
    }
}

/// Refine `text`, falling back to the local strip with the same options.
///
/// Whitespace-only input never reaches the refiner and comes back `Idle`.
pub async fn refine_or_strip<R: Refiner>(
    refiner: &R,
    text: &str,
    options: &MarkupOptions,
) -> RefineOutcome {
    if text.trim().is_empty() {
        return RefineOutcome {
            text: strip_markdown(text, options),
            status: ProcessingStatus::Idle,
            error: None,
        };
    }

    let start = Instant::now();
    match refiner.refine(text).await {
        Ok(refined) => {
            debug!(
                duration_ms = start.elapsed().as_millis() as u64,
                chars = refined.len(),
                "Refinement completed"
            );
            RefineOutcome {
                text: refined,
                status: ProcessingStatus::Completed,
                error: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Refinement failed, falling back to local strip");
            RefineOutcome {
                text: strip_markdown(text, options),
                status: ProcessingStatus::Error,
                error: Some(e),
            }
        }
    }
}

/// Pipes text through an external command: input on stdin, result on stdout
#[derive(Debug, Clone, Default)]
pub struct CommandRefiner {
    command: Option<String>,
    args: Vec<String>,
}

impl CommandRefiner {
    pub fn new(command: Option<String>, args: Vec<String>) -> Self {
        Self { command, args }
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }
}

impl Refiner for CommandRefiner {
    async fn refine(&self, text: &str) -> Result<String, RefineError> {
        let command = self.command.as_deref().ok_or(RefineError::NotConfigured)?;

        let mut child = Command::new(command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RefineError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            RefineError::Io(std::io::Error::other("refine command stdin unavailable"))
        })?;

        // Feed stdin while collecting output so large inputs cannot deadlock
        let feed = async move {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await
        };
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        if !output.status.success() {
            return Err(RefineError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        // A command that exits cleanly without reading all its input is fine
        if let Err(e) = fed {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }

        let refined = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if refined.is_empty() {
            return Err(RefineError::EmptyOutput);
        }
        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct UppercaseRefiner;

    impl Refiner for UppercaseRefiner {
        async fn refine(&self, text: &str) -> Result<String, RefineError> {
            Ok(text.to_uppercase())
        }
    }

    #[derive(Default)]
    struct FailingRefiner {
        calls: AtomicUsize,
    }

    impl Refiner for FailingRefiner {
        async fn refine(&self, _text: &str) -> Result<String, RefineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RefineError::EmptyOutput)
        }
    }

    #[tokio::test]
    async fn test_refined_text_is_used() {
        let outcome =
            refine_or_strip(&UppercaseRefiner, "# hello", &MarkupOptions::default()).await;
        assert_eq!(outcome.text, "# HELLO");
        assert_eq!(outcome.status, ProcessingStatus::Completed);
        assert!(outcome.error.is_none());
        assert!(!outcome.fell_back());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_local_strip() {
        let refiner = FailingRefiner::default();
        let options = MarkupOptions {
            flatten_lists: true,
            ..MarkupOptions::default()
        };
        let input = "# Title\n- **one**\n- two";

        let outcome = refine_or_strip(&refiner, input, &options).await;
        assert_eq!(outcome.text, strip_markdown(input, &options));
        assert_eq!(outcome.text, "Title\none\ntwo");
        assert!(outcome.fell_back());
        assert!(matches!(outcome.error, Some(RefineError::EmptyOutput)));
        assert_eq!(refiner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_input_skips_refiner() {
        let refiner = FailingRefiner::default();
        let outcome = refine_or_strip(&refiner, "   \n", &MarkupOptions::default()).await;
        assert_eq!(outcome.status, ProcessingStatus::Idle);
        assert_eq!(outcome.text, "\n");
        assert_eq!(refiner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_command_refiner() {
        let refiner = CommandRefiner::default();
        assert!(!refiner.is_configured());
        let result = refiner.refine("text").await;
        assert!(matches!(result, Err(RefineError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let refiner = CommandRefiner::new(
            Some("cleandraft-no-such-refiner-binary".to_string()),
            vec![],
        );
        let result = refiner.refine("text").await;
        assert!(matches!(result, Err(RefineError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_refiner_pipes_through() {
        let refiner = CommandRefiner::new(Some("cat".to_string()), vec![]);
        let refined = refiner.refine("  polished text \n").await.unwrap();
        assert_eq!(refined, "polished text");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_refiner_nonzero_exit() {
        let refiner = CommandRefiner::new(
            Some("sh".to_string()),
            vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
        );
        match refiner.refine("text").await {
            Err(RefineError::ExitStatus { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("expected exit status error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_refiner_empty_output() {
        let refiner = CommandRefiner::new(Some("true".to_string()), vec![]);
        let result = refiner.refine("text").await;
        assert!(matches!(result, Err(RefineError::EmptyOutput)));
    }
}
