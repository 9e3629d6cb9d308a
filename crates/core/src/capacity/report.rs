//! Capacity verdict for a produced artifact.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::transport::{encoded_len, DATA_URI_PREFIX};
use crate::encoder::{EncodeError, TranscodeOutcome};

/// Alphanumeric capacity of a version 40 QR symbol, in characters of the wrapped form.
pub const QR_CAPACITY: u64 = 7089;

/// Size of the artifact at each encoding stage, compared against [`QR_CAPACITY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Artifact bytes.
    pub raw_len: u64,
    /// Base64 characters.
    pub encoded_len: u64,
    /// Data URI characters.
    pub wrapped_len: u64,
    pub ceiling: u64,
    pub fits: bool,
    pub utilization_pct: f64,
    /// Only set when the payload does not fit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_duration_secs: Option<f64>,
}

impl CapacityReport {
    /// Builds the report for an artifact of `raw_len` bytes encoded from `requested_duration_secs`.
    pub fn from_raw_len(raw_len: u64, requested_duration_secs: f64) -> Self {
        let encoded_len = encoded_len(raw_len);
        let wrapped_len = encoded_len + DATA_URI_PREFIX.len() as u64;
        let fits = fits_capacity(wrapped_len);

        Self {
            raw_len,
            encoded_len,
            wrapped_len,
            ceiling: QR_CAPACITY,
            fits,
            utilization_pct: utilization_pct(wrapped_len),
            suggested_duration_secs: (!fits)
                .then(|| suggested_duration(requested_duration_secs, wrapped_len)),
        }
    }

    pub fn from_bytes(bytes: &[u8], requested_duration_secs: f64) -> Self {
        Self::from_raw_len(bytes.len() as u64, requested_duration_secs)
    }

    /// Characters over the ceiling, if any.
    pub fn overflow(&self) -> Option<u64> {
        self.wrapped_len.checked_sub(self.ceiling).filter(|&n| n > 0)
    }
}

/// Reads the artifact once and reports on it.
pub async fn evaluate(
    outcome: &TranscodeOutcome,
    requested_duration_secs: f64,
) -> Result<CapacityReport, EncodeError> {
    let bytes = read_artifact(&outcome.output_path).await?;
    Ok(CapacityReport::from_bytes(&bytes, requested_duration_secs))
}

/// Artifact bytes, mapping any failure to `OutputUnreadable`.
pub async fn read_artifact(path: &Path) -> Result<Vec<u8>, EncodeError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| EncodeError::OutputUnreadable {
            path: path.to_path_buf(),
            source,
        })
}

/// The verdict: a wrapped payload fits iff it is at most [`QR_CAPACITY`] characters.
pub fn fits_capacity(wrapped_len: u64) -> bool {
    wrapped_len <= QR_CAPACITY
}

pub fn utilization_pct(wrapped_len: u64) -> f64 {
    wrapped_len as f64 / QR_CAPACITY as f64 * 100.0
}

/// Duration that would have produced a wrapped form of exactly the ceiling,
/// assuming size grows linearly with duration. Container overhead makes this a hint.
pub fn suggested_duration(requested_duration_secs: f64, wrapped_len: u64) -> f64 {
    requested_duration_secs * QR_CAPACITY as f64 / wrapped_len as f64
}
