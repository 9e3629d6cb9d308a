//! Types for the encoder module.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::EncodeError;

/// Voice band kept by the filter chain (Hz).
pub const HIGHPASS_HZ: u32 = 80;
pub const LOWPASS_HZ: u32 = 8000;

/// Fixed Opus settings for the smallest intelligible voice clip.
pub const CODEC: &str = "libopus";
pub const CHANNELS: u8 = 1;
pub const SAMPLE_RATE_HZ: u32 = 8000;
pub const APPLICATION: &str = "voip";
pub const COMPRESSION_LEVEL: u8 = 10;
pub const FRAME_DURATION_MS: u32 = 60;
pub const PACKET_LOSS_PCT: u8 = 0;

/// Extension of generated output files.
pub const OUTPUT_EXTENSION: &str = "opus";

/// A single optimization request. Fully determines the encoder invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeRequest {
    source: PathBuf,
    destination: Option<PathBuf>,
    duration_secs: f64,
    volume: f64,
    bitrate_kbps: u32,
}

impl TranscodeRequest {
    /// Validates and builds a request.
    ///
    /// Existence of `source` is checked by the executor, right before spawning.
    pub fn new(
        source: impl Into<PathBuf>,
        destination: Option<PathBuf>,
        duration_secs: f64,
        volume: f64,
        bitrate_kbps: u32,
    ) -> Result<Self, EncodeError> {
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Err(EncodeError::invalid_request(format!(
                "duration must be a positive number of seconds, got {}",
                duration_secs
            )));
        }
        if !(volume.is_finite() && volume > 0.0) {
            return Err(EncodeError::invalid_request(format!(
                "volume must be a positive multiplier, got {}",
                volume
            )));
        }
        if bitrate_kbps == 0 {
            return Err(EncodeError::invalid_request("bitrate must be at least 1 kbps"));
        }

        Ok(Self {
            source: source.into(),
            destination,
            duration_secs,
            volume,
            bitrate_kbps,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }
}

/// Fully resolved encoder invocation produced by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationSpec {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path (overwritten if present).
    pub output_path: PathBuf,
    /// The `-af` filter chain.
    pub filter_chain: String,
    /// Arguments passed to the encoder, program name excluded.
    pub args: Vec<OsString>,
}

impl InvocationSpec {
    /// The full command as echoed for diagnostics: program and arguments joined by spaces.
    pub fn command_line(&self, program: &Path) -> String {
        let mut line = program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Result of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeOutcome {
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub size_bytes: u64,
    /// Wall time spent in the encoder, in milliseconds.
    pub duration_ms: u64,
}
