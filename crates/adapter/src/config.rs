//! Config file discovery and loading
//!
//! Settings are layered, highest priority first:
//! 1. CLI arguments
//! 2. Environment variables (handled by clap)
//! 3. Config file (see [`find_config_file`])
//! 4. Built-in defaults

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where the config file was found, if anywhere
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Given with `--config` or the config env var
    Explicit(PathBuf),
    /// In the working directory
    CurrentDir(PathBuf),
    /// Under `$XDG_CONFIG_HOME/nws-tables/` (or `~/.config/nws-tables/`)
    XdgConfig(PathBuf),
    /// Under `/etc/nws-tables/`
    System(PathBuf),
    /// Nothing found
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p),
            ConfigSource::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Look for `filename` in, in order: the path named by `env_var`, the
/// working directory, the XDG config home and `/etc/nws-tables/`.
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    if let Ok(path) = env::var(env_var) {
        let p = PathBuf::from(path);
        if p.exists() {
            return ConfigSource::Explicit(p);
        }
    }

    let local = PathBuf::from(filename);
    if local.exists() {
        return ConfigSource::CurrentDir(local);
    }

    let xdg = xdg_config_dir().join(filename);
    if xdg.exists() {
        return ConfigSource::XdgConfig(xdg);
    }

    let system = PathBuf::from("/etc").join(APP_NAME).join(filename);
    if system.exists() {
        return ConfigSource::System(system);
    }

    ConfigSource::Defaults
}

fn xdg_config_dir() -> PathBuf {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join(APP_NAME)
    } else if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".config").join(APP_NAME)
    } else {
        PathBuf::from(".config").join(APP_NAME)
    }
}

/// Parse the TOML file behind `source`, or `T::default()` when there is none.
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(T::default()),
    }
}
