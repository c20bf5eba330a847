//! Server configuration.
//!
//! Read from `~/.config/timeline/config.toml` when present, then overridden by
//! `TIMELINE_*` environment variables (e.g. `TIMELINE_PORT=9000`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{TimelineError, TimelineResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/timeline";
static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Where timeline documents are stored
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static frontend files, served at `/`
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            data_dir: default_data_dir(),
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn config_path() -> TimelineResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TimelineError::Config("Could not determine config directory".into()))?
            .join("timeline");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path plus environment overrides.
    pub fn load() -> TimelineResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> TimelineResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("TIMELINE"))
            .build()
            .map_err(|e| TimelineError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TimelineError::Config(e.to_string()))
    }

    /// `data_dir` with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn static_path(&self) -> Option<PathBuf> {
        self.static_dir.as_deref().map(expand)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
