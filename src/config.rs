//! Configuration loading
//!
//! Reads `~/.config/mediasearch-suggest/config.toml`. A missing file yields
//! the defaults; a malformed one is an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SuggestError;

pub mod types;

pub use types::{BackendConfig, CompletionScope, Config, LookupConfig};

const CONFIG_DIR: &str = "mediasearch-suggest";
const CONFIG_FILE: &str = "config.toml";

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config() -> Result<Config, SuggestError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };

    load_config_from_path(&path)
}

pub fn load_config_from_path(path: &Path) -> Result<Config, SuggestError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    parse_config_toml(&contents)
}

pub fn parse_config_toml(content: &str) -> Result<Config, SuggestError> {
    let config: Config =
        toml::from_str(content).map_err(|e| SuggestError::Config(e.to_string()))?;

    if config.lookup.results_limit == 0 {
        return Err(SuggestError::Config(
            "lookup.results_limit must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
