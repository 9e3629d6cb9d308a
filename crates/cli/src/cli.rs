//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use pearl_core::{Config, OptimizeOptions};

/// Optimize audio files for QR code embedding
#[derive(Debug, Parser)]
#[command(name = "pearl-optimize", version)]
pub struct Cli {
    /// Input audio file path
    pub input: PathBuf,

    /// Output Opus file path (default: auto-generated)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Duration to keep in seconds (default: 1.2)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Volume boost multiplier (default: 15.0)
    #[arg(short = 'v', long)]
    pub volume: Option<f64>,

    /// Target bitrate in kbps (default: 6)
    #[arg(short, long)]
    pub bitrate: Option<u32>,

    /// Print FFmpeg command
    #[arg(short, long)]
    pub command: bool,

    /// Play the resulting file
    #[arg(short, long)]
    pub play: bool,

    /// Skip the QR capacity analysis
    #[arg(long)]
    pub no_analysis: bool,

    /// Also print the capacity report as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the data URI to this file
    #[arg(long, value_name = "PATH")]
    pub emit_uri: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, env = "PEARL_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        let defaults = &mut config.defaults;
        if let Some(duration) = self.duration {
            defaults.duration_secs = duration;
        }
        if let Some(volume) = self.volume {
            defaults.volume = volume;
        }
        if let Some(bitrate) = self.bitrate {
            defaults.bitrate_kbps = bitrate;
        }
        if self.command {
            defaults.print_command = true;
        }
        if self.no_analysis {
            defaults.analyze = false;
        }
        if self.play {
            defaults.play = true;
        }
    }

    /// Run switches from the resolved configuration.
    pub fn options(&self, config: &Config) -> OptimizeOptions {
        OptimizeOptions {
            print_command: config.defaults.print_command,
            analyze: config.defaults.analyze,
            play: config.defaults.play,
            include_data_uri: self.emit_uri.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_leave_config_untouched() {
        let cli = Cli::try_parse_from(["pearl-optimize", "voice.wav"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.input, PathBuf::from("voice.wav"));
        assert!(cli.output.is_none());
        assert_eq!(config.defaults.duration_secs, 1.2);
        assert_eq!(config.defaults.volume, 15.0);
        assert_eq!(config.defaults.bitrate_kbps, 6);

        let options = cli.options(&config);
        assert_eq!(options, OptimizeOptions::default());
    }

    #[test]
    fn test_short_flags_override_config() {
        let cli = Cli::try_parse_from([
            "pearl-optimize",
            "voice.wav",
            "-o",
            "out.opus",
            "-d",
            "0.9",
            "-v",
            "8",
            "-b",
            "10",
            "-c",
            "-p",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(cli.output, Some(PathBuf::from("out.opus")));
        assert_eq!(config.defaults.duration_secs, 0.9);
        assert_eq!(config.defaults.volume, 8.0);
        assert_eq!(config.defaults.bitrate_kbps, 10);

        let options = cli.options(&config);
        assert!(options.print_command);
        assert!(options.play);
        assert!(options.analyze);
    }

    #[test]
    fn test_long_only_flags() {
        let cli = Cli::try_parse_from([
            "pearl-optimize",
            "voice.wav",
            "--no-analysis",
            "--json",
            "--emit-uri",
            "payload.txt",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        let options = cli.options(&config);
        assert!(!options.analyze);
        assert!(options.include_data_uri);
        assert!(cli.json);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["pearl-optimize"]).is_err());
    }

    #[test]
    fn test_bitrate_must_be_integer() {
        assert!(Cli::try_parse_from(["pearl-optimize", "a.wav", "-b", "6.5"]).is_err());
    }
}
