use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - A MakeMKV profile is configured
/// - An output directory is configured
/// - At least one disc is processed
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.makemkv.profile.is_none() {
        return Err(ConfigError::ValidationError(
            "makemkv.profile must be defined (NZBPO_PROFILE)".to_string(),
        ));
    }

    if config.output.directory.is_none() {
        return Err(ConfigError::ValidationError(
            "output.directory must be defined (NZBPO_DIRECTORY)".to_string(),
        ));
    }

    if config.job.discs <= 0 {
        return Err(ConfigError::ValidationError(
            "job.discs must be at least 1".to_string(),
        ));
    }

    Ok(())
}
