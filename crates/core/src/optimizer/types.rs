//! Optimizer types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::capacity::CapacityReport;
use crate::encoder::{EncoderCapabilities, TranscodeOutcome};

/// Per-run switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// Report the exact encoder command line before running it.
    #[serde(default)]
    pub print_command: bool,
    /// Measure the artifact against the QR budget.
    #[serde(default = "default_analyze")]
    pub analyze: bool,
    /// Play the artifact after a successful encode.
    #[serde(default)]
    pub play: bool,
    /// Return the full `data:` URI in the outcome.
    #[serde(default)]
    pub include_data_uri: bool,
}

fn default_analyze() -> bool {
    true
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            print_command: false,
            analyze: default_analyze(),
            play: false,
            include_data_uri: false,
        }
    }
}

/// Progress reported while a run advances through its stages.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizerEvent {
    /// The encoder answered its availability probe.
    EncoderReady(EncoderCapabilities),
    /// The command line about to run. Only emitted with `print_command`.
    Command(String),
    /// The encoder produced the artifact.
    Encoded(TranscodeOutcome),
    /// Capacity verdict. Only emitted with `analyze`.
    Capacity(CapacityReport),
    /// Playback is starting. Only emitted with `play`.
    Playing(PathBuf),
}

/// Callback invoked for every [`OptimizerEvent`].
pub type ProgressCallback = Arc<dyn Fn(&OptimizerEvent) + Send + Sync>;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizeOutcome {
    pub output_path: PathBuf,
    pub size_bytes: u64,
    /// Present when the run was asked to analyze.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CapacityReport>,
    /// Present when the run was asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}
