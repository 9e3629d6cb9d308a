//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external-process traits,
//! so the optimizer can be exercised without ffmpeg or ffplay installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use pearl_core::testing::{fixtures, MockEncoder, MockPlayer};
//! use pearl_core::{OptimizeOptions, Optimizer};
//!
//! let encoder = MockEncoder::new();
//! encoder.set_artifact_size(4000).await;
//!
//! let optimizer = Optimizer::new(encoder.clone(), MockPlayer::new());
//! let outcome = optimizer.run(&fixtures::request(input), &OptimizeOptions::default()).await?;
//! assert!(!outcome.report.unwrap().fits);
//! ```

mod mock_encoder;
mod mock_player;

pub use mock_encoder::MockEncoder;
pub use mock_player::MockPlayer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::encoder::TranscodeRequest;

    /// Minimal WAV header followed by silence; only its existence matters to mocks.
    pub const SAMPLE_WAV: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt \x10\x00\x00\x00\x01\x00\x01\x00\x40\x1f\x00\x00\x80\x3e\x00\x00\x02\x00\x10\x00data\x00\x00\x00\x00";

    /// Write a placeholder input file into `dir` and return its path.
    pub fn sample_input(dir: &Path) -> PathBuf {
        let path = dir.join("voice.wav");
        std::fs::write(&path, SAMPLE_WAV).expect("Failed to write sample input");
        path
    }

    /// A request with the default parameters (1.2 s, 15x gain, 6 kbps) and a generated output.
    pub fn request(source: impl Into<PathBuf>) -> TranscodeRequest {
        TranscodeRequest::new(source, None, 1.2, 15.0, 6).expect("default request is valid")
    }

    /// A request with the default parameters and an explicit output path.
    pub fn request_with_output(
        source: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> TranscodeRequest {
        TranscodeRequest::new(source, Some(output.into()), 1.2, 15.0, 6)
            .expect("default request is valid")
    }
}
