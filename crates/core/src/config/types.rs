use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// External encoder configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncoderConfig {
    /// Path (or bare name resolved through PATH) of the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Upper bound for the `-version` / `-encoders` availability checks.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Upper bound for a single encode.
    #[serde(default = "default_encode_timeout")]
    pub encode_timeout_secs: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            probe_timeout_secs: default_probe_timeout(),
            encode_timeout_secs: default_encode_timeout(),
        }
    }
}

impl EncoderConfig {
    /// Creates a config pointing at a specific ffmpeg binary.
    pub fn with_path(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ..Default::default()
        }
    }

    /// Sets the encode timeout in seconds.
    pub fn with_encode_timeout(mut self, timeout_secs: u64) -> Self {
        self.encode_timeout_secs = timeout_secs;
        self
    }

    /// Sets the probe timeout in seconds.
    pub fn with_probe_timeout(mut self, timeout_secs: u64) -> Self {
        self.probe_timeout_secs = timeout_secs;
        self
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_probe_timeout() -> u64 {
    10
}

fn default_encode_timeout() -> u64 {
    30
}

/// Playback configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_ffplay_path")]
    pub ffplay_path: PathBuf,
    /// Playback is killed after this many seconds.
    #[serde(default = "default_player_timeout")]
    pub timeout_secs: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            ffplay_path: default_ffplay_path(),
            timeout_secs: default_player_timeout(),
        }
    }
}

fn default_ffplay_path() -> PathBuf {
    PathBuf::from("ffplay")
}

fn default_player_timeout() -> u64 {
    60
}

/// Defaults for a single optimization run, overridable per invocation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_duration")]
    pub duration_secs: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_bitrate")]
    pub bitrate_kbps: u32,
    #[serde(default)]
    pub print_command: bool,
    #[serde(default = "default_analyze")]
    pub analyze: bool,
    #[serde(default)]
    pub play: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            volume: default_volume(),
            bitrate_kbps: default_bitrate(),
            print_command: false,
            analyze: default_analyze(),
            play: false,
        }
    }
}

fn default_duration() -> f64 {
    1.2
}

fn default_volume() -> f64 {
    15.0
}

fn default_bitrate() -> u32 {
    6
}

fn default_analyze() -> bool {
    true
}
