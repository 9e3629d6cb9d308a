use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Encoder and player timeouts are not 0
/// - Default duration, volume and bitrate are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.encoder.probe_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "encoder.probe_timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.encoder.encode_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "encoder.encode_timeout_secs cannot be 0".to_string(),
        ));
    }
    if config.player.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "player.timeout_secs cannot be 0".to_string(),
        ));
    }

    let defaults = &config.defaults;
    if !(defaults.duration_secs.is_finite() && defaults.duration_secs > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "defaults.duration_secs must be positive, got {}",
            defaults.duration_secs
        )));
    }
    if !(defaults.volume.is_finite() && defaults.volume > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "defaults.volume must be positive, got {}",
            defaults.volume
        )));
    }
    if defaults.bitrate_kbps == 0 {
        return Err(ConfigError::ValidationError(
            "defaults.bitrate_kbps cannot be 0".to_string(),
        ));
    }

    Ok(())
}
