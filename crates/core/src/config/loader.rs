use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// NZBGet post-processing variables and the configuration keys they fill.
///
/// `NZBPO_*` are the script options set in NZBGet's settings page,
/// `NZBPP_*` describe the download being post-processed.
pub const NZBGET_VARIABLES: &[(&str, &str)] = &[
    ("NZBPO_PROFILE", "makemkv.profile"),
    ("NZBPO_DIRECTORY", "output.directory"),
    ("NZBPP_DIRECTORY", "job.download_directory"),
    ("NZBPP_TOTALSTATUS", "job.download_status"),
    ("NZBPP_TITLES", "job.titles"),
];

/// Load configuration from an optional file, then `BDRIP_` variables, then
/// the NZBGet variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed("BDRIP_").split("__"))
        .merge(nzbget_env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn nzbget_env() -> Env {
    let variables: Vec<&str> = NZBGET_VARIABLES.iter().map(|(var, _)| *var).collect();

    Env::raw().only(&variables).map(|key| {
        NZBGET_VARIABLES
            .iter()
            .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
            .map(|(_, config_key)| (*config_key).into())
            .unwrap_or_else(|| key.into())
    })
}
