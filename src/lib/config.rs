use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::link::{DEFAULT_SETTLE, LinkOptions};
use crate::upstream::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const ENV_API_KEY: &str = "GROQ_API_KEY";
pub const ENV_PORT: &str = "MOUTH_SERIAL_PORT";
pub const ENV_BAUD: &str = "MOUTH_SERIAL_BAUD";
pub const ENV_MODEL: &str = "MOUTH_MODEL";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial device of the mouth controller.
    pub port: String,
    pub baud: u32,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Milliseconds to wait after opening the port.
    pub settle_ms: u64,
    /// Name shown in front of replies.
    pub assistant_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port().to_string(),
            baud: 9600,
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            settle_ms: DEFAULT_SETTLE.as_millis() as u64,
            assistant_name: "Groq".to_string(),
        }
    }
}

pub fn default_port() -> &'static str {
    if cfg!(windows) { "COM4" } else { "/dev/ttyACM0" }
}

/// Platform config directory, e.g. `~/.config/text-to-mouth` on Linux.
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "text-to-mouth").map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn default_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the config file, then environment variables.
    ///
    /// An explicit `path` must exist. The default config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) => match Self::from_file(&path) {
                    Err(ConfigError::Read { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        Self::default()
                    }
                    other => other?,
                },
                None => Self::default(),
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Override fields from environment-style variables found by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port;
        }
        if let Some(baud) = lookup(ENV_BAUD) {
            match baud.trim().parse() {
                Ok(baud) => self.baud = baud,
                Err(_) => warn!("Ignoring {ENV_BAUD}={baud}: not a number"),
            }
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.model = model;
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            settle: self.settle(),
            ..LinkOptions::default()
        }
    }
}
