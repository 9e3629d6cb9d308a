//! Headless playback through ffplay.

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tokio::time::Duration;

use super::error::EncodeError;
use super::process::{run_bounded, RunError};
use super::traits::Player;
use crate::config::PlayerConfig;

/// Plays a file with `ffplay -nodisp -autoexit`, discarding its output.
pub struct FfplayPlayer {
    config: PlayerConfig,
}

impl FfplayPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Player for FfplayPlayer {
    fn name(&self) -> &str {
        "ffplay"
    }

    async fn play(&self, path: &Path) -> Result<(), EncodeError> {
        let result = run_bounded(
            Command::new(&self.config.ffplay_path)
                .args(["-nodisp", "-autoexit"])
                .arg(path),
            Duration::from_secs(self.config.timeout_secs),
        )
        .await;

        match result {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(EncodeError::EncodeFailed {
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Err(RunError::Spawn(e)) if e.kind() == std::io::ErrorKind::NotFound => Err(
                EncodeError::tool_unavailable(&self.config.ffplay_path, e.to_string()),
            ),
            Err(RunError::Spawn(e)) | Err(RunError::Io(e)) => Err(EncodeError::Io(e)),
            Err(RunError::Timeout) => Err(EncodeError::EncodeTimeout {
                timeout_secs: self.config.timeout_secs,
            }),
        }
    }
}
