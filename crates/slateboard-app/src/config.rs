//! Loading configuration files.

use slateboard_core::{BoardConfig, ConfigError};
use std::path::Path;

/// Read and validate a JSON config file. Missing fields take defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<BoardConfig, ConfigError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let config = BoardConfig::from_json(&json)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}
