//! Trait definitions for the encoder module.

use async_trait::async_trait;
use std::path::Path;

use super::capabilities::EncoderCapabilities;
use super::error::EncodeError;
use super::types::{InvocationSpec, TranscodeOutcome};

/// An external encoder that can run a planned invocation.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Returns the name of this encoder implementation.
    fn name(&self) -> &str;

    /// Program shown when echoing the command line.
    fn program(&self) -> &Path;

    /// Whether the encoder starts and exits successfully within the probe timeout.
    ///
    /// Never fails: spawn errors, non-zero exits and timeouts all yield `false`.
    async fn is_available(&self) -> bool;

    /// Inspects the encoder build. Only meaningful once `is_available` returned true.
    async fn capabilities(&self) -> EncoderCapabilities {
        EncoderCapabilities::default()
    }

    /// Availability check followed by inspection; `None` when unavailable.
    ///
    /// Implementations may override this to share process runs between the two.
    async fn probe(&self) -> Option<EncoderCapabilities> {
        if self.is_available().await {
            Some(self.capabilities().await)
        } else {
            None
        }
    }

    /// Runs the invocation, overwriting `spec.output_path`.
    async fn execute(&self, spec: &InvocationSpec) -> Result<TranscodeOutcome, EncodeError>;
}

/// Headless playback of a produced artifact.
#[async_trait]
pub trait Player: Send + Sync {
    /// Returns the name of this player implementation.
    fn name(&self) -> &str;

    /// Plays the file to completion. Callers treat failures as non-fatal.
    async fn play(&self, path: &Path) -> Result<(), EncodeError>;
}
