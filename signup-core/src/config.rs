//! Service configuration.
//!
//! Layered, lowest priority first: built-in defaults, the optional
//! `~/.config/signup/config.toml` (or the file named by `SIGNUP_CONFIG`),
//! then `SIGNUP_*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{SignupError, SignupResult};

static DEFAULT_DATA_FILE: &str = "data/activities.json";
static DEFAULT_STATIC_DIR: &str = "static";
static DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

const ENV_PREFIX: &str = "SIGNUP";
const CONFIG_PATH_VAR: &str = "SIGNUP_CONFIG";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STATIC_DIR)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SignupConfig {
    /// JSON file holding all activities.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for SignupConfig {
    fn default() -> Self {
        SignupConfig {
            data_file: default_data_file(),
            static_dir: default_static_dir(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl SignupConfig {
    /// Default location of the config file.
    pub fn config_path() -> SignupResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            return Ok(PathBuf::from(shellexpand::tilde(&path).into_owned()));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| SignupError::Config("Could not determine config directory".into()))?
            .join("signup");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config file location plus the environment.
    pub fn load() -> SignupResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` (which may be absent) plus the environment.
    pub fn load_from(path: &Path) -> SignupResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| SignupError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SignupError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_file)
    }

    pub fn static_path(&self) -> PathBuf {
        expand(&self.static_dir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
