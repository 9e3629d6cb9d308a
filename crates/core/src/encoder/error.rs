//! Error types for the encoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can stop an optimization run.
///
/// A payload that is too large for the QR symbol is not an error; it is the
/// `fits == false` verdict of [`CapacityReport`](crate::capacity::CapacityReport).
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The encoder binary is missing or does not answer `-version`.
    #[error("Encoder not available at {path}: {reason}")]
    ToolUnavailable { path: PathBuf, reason: String },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Request parameters out of range.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Encoder did not finish within the configured bound.
    #[error("Encoder timed out after {timeout_secs} seconds")]
    EncodeTimeout { timeout_secs: u64 },

    /// Encoder exited unsuccessfully. `stderr` is passed through verbatim.
    #[error("Encoder failed with code {}: {stderr}", display_code(.exit_code))]
    EncodeFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The encoder reported success but the artifact cannot be read.
    #[error("Output file unreadable: {path}: {source}")]
    OutputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while spawning or talking to a child process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    /// Creates a new tool unavailable error.
    pub fn tool_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ToolUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Whether this error is retryable.
    ///
    /// Nothing is retried automatically; a caller may re-invoke with different parameters.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Whether the user can fix this by changing the invocation.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::InputNotFound { .. } | Self::InvalidRequest { .. })
    }
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}
