//! Optimizer implementation.
//!
//! Runs one request straight through the pipeline:
//! probe -> plan -> encode -> measure -> (optional) play.
//! The first failing stage ends the run; nothing is retried.

use tracing::{debug, info, warn};

use crate::capacity::{data_uri, read_artifact, CapacityReport};
use crate::encoder::{build_plan, EncodeError, Encoder, Player, TranscodeRequest};

use super::types::{OptimizeOptions, OptimizeOutcome, OptimizerEvent, ProgressCallback};

/// Drives a request through encoder and capacity check.
pub struct Optimizer<E, P>
where
    E: Encoder,
    P: Player,
{
    encoder: E,
    player: P,
    progress_callback: Option<ProgressCallback>,
}

impl<E, P> Optimizer<E, P>
where
    E: Encoder,
    P: Player,
{
    /// Create a new optimizer.
    pub fn new(encoder: E, player: P) -> Self {
        Self {
            encoder,
            player,
            progress_callback: None,
        }
    }

    /// Set a callback that receives every stage event.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn emit(&self, event: OptimizerEvent) {
        if let Some(ref callback) = self.progress_callback {
            callback(&event);
        }
    }

    /// Runs one request. Concurrent runs must target different output paths;
    /// two runs writing the same path race and the last writer wins.
    pub async fn run(
        &self,
        request: &TranscodeRequest,
        options: &OptimizeOptions,
    ) -> Result<OptimizeOutcome, EncodeError> {
        let capabilities = match self.encoder.probe().await {
            Some(capabilities) => capabilities,
            None => {
                return Err(EncodeError::tool_unavailable(
                    self.encoder.program(),
                    format!("{} is not installed or not runnable", self.encoder.name()),
                ));
            }
        };
        debug!(
            "Encoder {} version {:?}, libopus: {}",
            self.encoder.name(),
            capabilities.version,
            capabilities.libopus
        );
        if !capabilities.libopus {
            warn!(
                "libopus not listed by {}; the encode will likely fail",
                self.encoder.name()
            );
        }
        self.emit(OptimizerEvent::EncoderReady(capabilities));

        if !request.source().exists() {
            return Err(EncodeError::InputNotFound {
                path: request.source().to_path_buf(),
            });
        }

        let spec = build_plan(request);
        if options.print_command {
            self.emit(OptimizerEvent::Command(
                spec.command_line(self.encoder.program()),
            ));
        }

        let outcome = self.encoder.execute(&spec).await?;
        self.emit(OptimizerEvent::Encoded(outcome.clone()));

        let mut report = None;
        let mut uri = None;
        if options.analyze || options.include_data_uri {
            let bytes = read_artifact(&outcome.output_path).await?;

            if options.analyze {
                let capacity = CapacityReport::from_bytes(&bytes, request.duration_secs());
                if capacity.fits {
                    info!(
                        "Payload fits: {} of {} characters ({:.1}%)",
                        capacity.wrapped_len, capacity.ceiling, capacity.utilization_pct
                    );
                } else {
                    info!(
                        "Payload too large: {} of {} characters, suggested duration {:?}",
                        capacity.wrapped_len, capacity.ceiling, capacity.suggested_duration_secs
                    );
                }
                self.emit(OptimizerEvent::Capacity(capacity.clone()));
                report = Some(capacity);
            }

            if options.include_data_uri {
                uri = Some(data_uri(&bytes));
            }
        }

        if options.play {
            self.emit(OptimizerEvent::Playing(outcome.output_path.clone()));
            if let Err(e) = self.player.play(&outcome.output_path).await {
                warn!("Playback with {} failed: {}", self.player.name(), e);
            }
        }

        Ok(OptimizeOutcome {
            output_path: outcome.output_path,
            size_bytes: outcome.size_bytes,
            report,
            data_uri: uri,
        })
    }
}
