//! Optimizer: the end-to-end run for a single request.
//!
//! Stages run strictly in order and the first failure ends the run:
//! - **Probe**: the encoder must answer `-version` within its timeout
//! - **Plan**: pure derivation of the encoder arguments
//! - **Encode**: one bounded child process
//! - **Measure**: capacity report from the artifact bytes
//! - **Play**: optional, failures only logged

mod runner;
mod types;

pub use runner::Optimizer;
pub use types::{OptimizeOptions, OptimizeOutcome, OptimizerEvent, ProgressCallback};
