//! FFmpeg-based encoder implementation.

use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::Duration;
use tracing::{debug, info};

use super::capabilities::EncoderCapabilities;
use super::error::EncodeError;
use super::process::{run_bounded, RunError};
use super::traits::Encoder;
use super::types::{InvocationSpec, TranscodeOutcome};
use crate::config::EncoderConfig;

/// FFmpeg-based encoder implementation.
pub struct FfmpegEncoder {
    config: EncoderConfig,
}

impl FfmpegEncoder {
    /// Creates a new FFmpeg encoder with the given configuration.
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Creates an encoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EncoderConfig::default())
    }

    /// Stdout of `ffmpeg -version` if it exits successfully within the probe timeout.
    async fn version_output(&self) -> Option<String> {
        let result = run_bounded(
            Command::new(&self.config.ffmpeg_path).arg("-version"),
            Duration::from_secs(self.config.probe_timeout_secs),
        )
        .await;

        match result {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                debug!(
                    "{:?} -version exited with {:?}",
                    self.config.ffmpeg_path,
                    output.status.code()
                );
                None
            }
            Err(RunError::Timeout) => {
                debug!(
                    "{:?} -version did not exit within {}s",
                    self.config.ffmpeg_path, self.config.probe_timeout_secs
                );
                None
            }
            Err(RunError::Spawn(e)) | Err(RunError::Io(e)) => {
                debug!("{:?} -version failed: {}", self.config.ffmpeg_path, e);
                None
            }
        }
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn program(&self) -> &Path {
        &self.config.ffmpeg_path
    }

    async fn is_available(&self) -> bool {
        self.version_output().await.is_some()
    }

    async fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities::detect(&self.config).await
    }

    async fn probe(&self) -> Option<EncoderCapabilities> {
        let stdout = self.version_output().await?;
        Some(EncoderCapabilities::from_version_output(&self.config, Some(&stdout)).await)
    }

    async fn execute(&self, spec: &InvocationSpec) -> Result<TranscodeOutcome, EncodeError> {
        // Precondition: never spawn for a missing input
        if !spec.input_path.exists() {
            return Err(EncodeError::InputNotFound {
                path: spec.input_path.clone(),
            });
        }

        debug!("Running {}", spec.command_line(&self.config.ffmpeg_path));
        let start = Instant::now();

        let output = run_bounded(
            Command::new(&self.config.ffmpeg_path).args(&spec.args),
            Duration::from_secs(self.config.encode_timeout_secs),
        )
        .await
        .map_err(|e| match e {
            RunError::Spawn(e) if e.kind() == std::io::ErrorKind::NotFound => {
                EncodeError::tool_unavailable(&self.config.ffmpeg_path, e.to_string())
            }
            RunError::Spawn(e) | RunError::Io(e) => EncodeError::Io(e),
            RunError::Timeout => EncodeError::EncodeTimeout {
                timeout_secs: self.config.encode_timeout_secs,
            },
        })?;

        if !output.status.success() {
            return Err(EncodeError::EncodeFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        // Verify output exists and get size
        let metadata = tokio::fs::metadata(&spec.output_path).await.map_err(|source| {
            EncodeError::OutputUnreadable {
                path: spec.output_path.clone(),
                source,
            }
        })?;

        let outcome = TranscodeOutcome {
            output_path: spec.output_path.clone(),
            size_bytes: metadata.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Encoded {:?} -> {:?} ({} bytes in {} ms)",
            spec.input_path, outcome.output_path, outcome.size_bytes, outcome.duration_ms
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::plan::build_plan;
    use crate::encoder::types::TranscodeRequest;
    use std::path::PathBuf;

    #[test]
    fn test_program_comes_from_config() {
        let encoder = FfmpegEncoder::new(EncoderConfig::with_path("/opt/ffmpeg"));
        assert_eq!(encoder.program(), Path::new("/opt/ffmpeg"));
        assert_eq!(encoder.name(), "ffmpeg");
    }

    #[tokio::test]
    async fn test_unavailable_when_binary_missing() {
        let encoder =
            FfmpegEncoder::new(EncoderConfig::with_path("pearl-test-no-such-ffmpeg"));
        assert!(!encoder.is_available().await);
        assert!(encoder.probe().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unavailable_on_non_zero_exit() {
        let encoder = FfmpegEncoder::new(EncoderConfig::with_path("false"));
        assert!(!encoder.is_available().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_available_on_zero_exit() {
        let encoder = FfmpegEncoder::new(EncoderConfig::with_path("true"));
        assert!(encoder.is_available().await);
        // Silent binary: available, but nothing to parse
        assert_eq!(encoder.probe().await, Some(EncoderCapabilities::default()));
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_spawn() {
        // The binary does not exist either: reaching the spawn would yield ToolUnavailable
        let encoder =
            FfmpegEncoder::new(EncoderConfig::with_path("pearl-test-no-such-ffmpeg"));
        let request = TranscodeRequest::new(
            "/nonexistent/voice.wav",
            Some(PathBuf::from("/tmp/never-written.opus")),
            1.2,
            15.0,
            6,
        )
        .unwrap();

        let result = encoder.execute(&build_plan(&request)).await;
        match result {
            Err(EncodeError::InputNotFound { path }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/voice.wav"));
            }
            other => panic!("expected InputNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.wav");
        std::fs::write(&input, b"RIFF").unwrap();

        let encoder =
            FfmpegEncoder::new(EncoderConfig::with_path("pearl-test-no-such-ffmpeg"));
        let request =
            TranscodeRequest::new(&input, Some(dir.path().join("out.opus")), 1.2, 15.0, 6)
                .unwrap();

        let result = encoder.execute(&build_plan(&request)).await;
        assert!(matches!(result, Err(EncodeError::ToolUnavailable { .. })));
    }
}
