//! Encoder build inspection.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::Duration;

use super::process::run_bounded;
use crate::config::EncoderConfig;

/// What the installed ffmpeg build offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderCapabilities {
    /// Version token from `ffmpeg -version` (e.g. "6.1.1", "n7.0").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// libopus encoder compiled in
    pub libopus: bool,
}

impl EncoderCapabilities {
    /// Detect version and libopus support by probing ffmpeg.
    ///
    /// Any failure leaves the corresponding field at its default.
    pub async fn detect(config: &EncoderConfig) -> Self {
        let version_stdout = run_bounded(
            Command::new(&config.ffmpeg_path).arg("-version"),
            Duration::from_secs(config.probe_timeout_secs),
        )
        .await
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).into_owned());

        Self::from_version_output(config, version_stdout.as_deref()).await
    }

    /// Completes detection from an already captured `-version` output,
    /// so only the encoder listing is run.
    pub async fn from_version_output(config: &EncoderConfig, version_stdout: Option<&str>) -> Self {
        let version = version_stdout.and_then(parse_version);

        let libopus = run_bounded(
            Command::new(&config.ffmpeg_path).args(["-hide_banner", "-encoders"]),
            Duration::from_secs(config.probe_timeout_secs),
        )
        .await
        .ok()
        .filter(|o| o.status.success())
        .map(|o| lists_libopus(&String::from_utf8_lossy(&o.stdout)))
        .unwrap_or(false);

        Self { version, libopus }
    }
}

/// Extracts the version token from the first `ffmpeg version <token>` line.
pub fn parse_version(stdout: &str) -> Option<String> {
    let re = Regex::new(r"ffmpeg version (\S+)").ok()?;
    re.captures(stdout)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether an `-encoders` listing has a `libopus` entry.
pub fn lists_libopus(stdout: &str) -> bool {
    stdout
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some("libopus"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODERS: &str = "\
Encoders:
 V..... = Video
 A..... = Audio
 ------
 A....D flac                 FLAC (Free Lossless Audio Codec)
 A..... libopus              libopus Opus (codec opus)
 A..... opus                 Opus (experimental)
";

    #[test]
    fn test_default_capabilities() {
        let caps = EncoderCapabilities::default();
        assert!(caps.version.is_none());
        assert!(!caps.libopus);
    }

    #[test]
    fn test_parse_version() {
        let stdout = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers\n\
                      built with gcc 13 (Ubuntu 13.2.0-23ubuntu3)\n";
        assert_eq!(parse_version(stdout), Some("6.1.1-3ubuntu5".to_string()));
        assert_eq!(parse_version("something else"), None);
    }

    #[test]
    fn test_lists_libopus() {
        assert!(lists_libopus(ENCODERS));
    }

    #[test]
    fn test_native_opus_is_not_libopus() {
        let without = ENCODERS.replace(" A..... libopus              libopus Opus (codec opus)\n", "");
        assert!(!lists_libopus(&without));
    }

    #[tokio::test]
    async fn test_detect_missing_binary() {
        let config = EncoderConfig::with_path("pearl-test-no-such-ffmpeg");
        let caps = EncoderCapabilities::detect(&config).await;
        assert_eq!(caps, EncoderCapabilities::default());
    }
}
