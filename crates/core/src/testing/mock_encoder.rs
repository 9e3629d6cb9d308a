//! Mock encoder for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::encoder::{EncodeError, Encoder, EncoderCapabilities, InvocationSpec, TranscodeOutcome};

/// Byte written to fake artifacts.
const FILL_BYTE: u8 = 0x4f;

/// Mock implementation of the Encoder trait.
///
/// Provides controllable behavior for testing:
/// - Track invocations for assertions
/// - Simulate a missing encoder
/// - Simulate encode failures
/// - Control the artifact size written to the output path
///
/// # Example
///
/// ```rust,ignore
/// use pearl_core::testing::MockEncoder;
///
/// let encoder = MockEncoder::new();
/// encoder.set_artifact_size(5292).await; // just over the QR budget
///
/// let outcome = encoder.execute(&spec).await?;
///
/// let invocations = encoder.recorded_invocations().await;
/// assert_eq!(invocations.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEncoder {
    /// Recorded invocations.
    invocations: Arc<RwLock<Vec<InvocationSpec>>>,
    /// Number of availability probes answered.
    availability_checks: Arc<RwLock<usize>>,
    /// Result of the availability probe.
    available: Arc<RwLock<bool>>,
    /// Reported capabilities.
    capabilities: Arc<RwLock<EncoderCapabilities>>,
    /// If set, the next execution will fail with this error.
    next_error: Arc<RwLock<Option<EncodeError>>>,
    /// Bytes written to the output path on success.
    artifact_size: Arc<RwLock<usize>>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncoder {
    /// Create a new mock encoder.
    pub fn new() -> Self {
        Self {
            invocations: Arc::new(RwLock::new(Vec::new())),
            availability_checks: Arc::new(RwLock::new(0)),
            available: Arc::new(RwLock::new(true)),
            capabilities: Arc::new(RwLock::new(EncoderCapabilities {
                version: Some("mock".to_string()),
                libopus: true,
            })),
            next_error: Arc::new(RwLock::new(None)),
            artifact_size: Arc::new(RwLock::new(1024)),
        }
    }

    /// Get all recorded invocations.
    pub async fn recorded_invocations(&self) -> Vec<InvocationSpec> {
        self.invocations.read().await.clone()
    }

    /// Get the number of executions attempted.
    pub async fn execution_count(&self) -> usize {
        self.invocations.read().await.len()
    }

    /// Get the number of availability probes.
    pub async fn availability_check_count(&self) -> usize {
        *self.availability_checks.read().await
    }

    /// Control the availability probe result.
    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    /// Control the reported capabilities.
    pub async fn set_capabilities(&self, capabilities: EncoderCapabilities) {
        *self.capabilities.write().await = capabilities;
    }

    /// Configure the next execution to fail with the given error.
    pub async fn set_next_error(&self, error: EncodeError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the number of bytes written per successful execution.
    pub async fn set_artifact_size(&self, size: usize) {
        *self.artifact_size.write().await = size;
    }

    async fn take_error(&self) -> Option<EncodeError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl Encoder for MockEncoder {
    fn name(&self) -> &str {
        "mock"
    }

    fn program(&self) -> &Path {
        Path::new("mock-ffmpeg")
    }

    async fn is_available(&self) -> bool {
        *self.availability_checks.write().await += 1;
        *self.available.read().await
    }

    async fn capabilities(&self) -> EncoderCapabilities {
        self.capabilities.read().await.clone()
    }

    async fn execute(&self, spec: &InvocationSpec) -> Result<TranscodeOutcome, EncodeError> {
        if !spec.input_path.exists() {
            return Err(EncodeError::InputNotFound {
                path: spec.input_path.clone(),
            });
        }

        self.invocations.write().await.push(spec.clone());

        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let size = *self.artifact_size.read().await;
        tokio::fs::write(&spec.output_path, vec![FILL_BYTE; size]).await?;

        Ok(TranscodeOutcome {
            output_path: spec.output_path.clone(),
            size_bytes: size as u64,
            duration_ms: 0,
        })
    }
}
