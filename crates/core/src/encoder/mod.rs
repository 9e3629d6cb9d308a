//! Encoder module: planning and running the external Opus encode.
//!
//! The planner turns a [`TranscodeRequest`] into a fully resolved
//! [`InvocationSpec`] without touching the filesystem. An [`Encoder`]
//! implementation then runs that invocation as a bounded child process.
//!
//! # Example
//!
//! ```ignore
//! use pearl_core::encoder::{build_plan, Encoder, FfmpegEncoder, TranscodeRequest};
//!
//! let encoder = FfmpegEncoder::with_defaults();
//! if !encoder.is_available().await {
//!     return Err(EncodeError::tool_unavailable("ffmpeg", "not installed"));
//! }
//!
//! let request = TranscodeRequest::new("hello.wav", None, 1.2, 15.0, 6)?;
//! let spec = build_plan(&request);
//! let outcome = encoder.execute(&spec).await?;
//! println!("{} bytes at {:?}", outcome.size_bytes, outcome.output_path);
//! ```

mod capabilities;
mod error;
mod ffmpeg;
mod plan;
mod player;
mod process;
mod traits;
mod types;

pub use capabilities::{lists_libopus, parse_version, EncoderCapabilities};
pub use error::EncodeError;
pub use ffmpeg::FfmpegEncoder;
pub use plan::{build_plan, filter_chain, generate_output_path};
pub use player::FfplayPlayer;
pub use traits::{Encoder, Player};
pub use types::{
    InvocationSpec, TranscodeOutcome, TranscodeRequest, APPLICATION, CHANNELS, CODEC,
    COMPRESSION_LEVEL, FRAME_DURATION_MS, HIGHPASS_HZ, LOWPASS_HZ, OUTPUT_EXTENSION,
    PACKET_LOSS_PCT, SAMPLE_RATE_HZ,
};
