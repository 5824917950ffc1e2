use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::ui::GlyphMode;

const CONFIG_PATH_ENV_VAR: &str = "DOTCAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("dotcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".dotcal.toml"));
    }

    locations
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tick_rate_ms: u64,
    pub glyphs: GlyphMode,
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate_ms: 1000,
            glyphs: GlyphMode::Auto,
            mouse: true,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;

        if config.tick_rate_ms == 0 {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                "tick_rate_ms must be greater than zero",
            ));
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::new(
                ErrorKind::ConfigNotFound,
                &format!("{}: {}", path.display(), e),
            )
        })?;

        Config::from_toml(&content).map_err(|e| {
            let msg = format!("{}: {}", path.display(), e.message.as_deref().unwrap_or(""));
            e.with_msg(&msg)
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Loads `path` if given, otherwise the first existing default location,
/// otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::load(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Loading config from {}", location.display());
            Config::load(&location)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
