pub mod capacity;
pub mod config;
pub mod encoder;
pub mod optimizer;
pub mod testing;

pub use capacity::{data_uri, evaluate, CapacityReport, DATA_URI_PREFIX, QR_CAPACITY};
pub use config::{
    load_config, load_config_from_str, resolve_config, validate_config, Config, ConfigError,
    DefaultsConfig, EncoderConfig, PlayerConfig,
};
pub use encoder::{
    build_plan, EncodeError, Encoder, EncoderCapabilities, FfmpegEncoder, FfplayPlayer,
    InvocationSpec, Player, TranscodeOutcome, TranscodeRequest,
};
pub use optimizer::{
    OptimizeOptions, OptimizeOutcome, Optimizer, OptimizerEvent, ProgressCallback,
};
