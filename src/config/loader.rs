use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use tracing::debug;

use crate::config::Config;

const CONFIG_DIR: &str = "screenmux";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config from the platform config directory.
///
/// A missing directory or file yields the defaults.
pub fn load() -> color_eyre::Result<Config> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(Config::default());
    };

    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    load_from(&path)
}

/// Load the config from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> color_eyre::Result<Config> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}
