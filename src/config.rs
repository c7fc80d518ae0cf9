//! Configuration loading.
//!
//! Values are merged from three sources, each overriding the previous one field by field:
//!
//! 1. built-in defaults
//! 2. the YAML config file (`token`, `home_id`, `format`)
//! 3. environment variables (`TIBBER_TOKEN`, `TIBBER_HOME_ID`, `TIBBER_FORMAT`)

use crate::ConfigError;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// Environment variable overriding the token.
pub const TOKEN_ENV: &str = "TIBBER_TOKEN";
/// Environment variable overriding the default home id.
pub const HOME_ID_ENV: &str = "TIBBER_HOME_ID";
/// Environment variable overriding the output format.
pub const FORMAT_ENV: &str = "TIBBER_FORMAT";

/// Output format used when none is configured.
pub const DEFAULT_FORMAT: &str = "pretty";

const APP_DIR: &str = "powerctl";
const CONFIG_FILE: &str = "config.yaml";

/// Merged configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Personal access token for the api. Required, see [`Config::validate`].
    pub token: String,

    /// Home queried when a command isn't given one explicitly.
    pub home_id: Option<String>,

    /// Output format name, e.g. `pretty` or `json`.
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            home_id: None,
            format: String::from(DEFAULT_FORMAT),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("token", &token)
            .field("home_id", &self.home_id)
            .field("format", &self.format)
            .finish()
    }
}

/// The config file as written on disk. Every key is optional, unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    token: Option<String>,
    home_id: Option<String>,
    format: Option<String>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_yaml::Value>,
}

impl Config {
    /// Load configuration from `path`, or from [`default_config_path`] if `None`, and the
    /// process environment.
    ///
    /// # Errors
    /// Fails if an explicit `path` doesn't exist, or if the file that is read fails to parse.
    /// A missing file at the default path is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], but reads environment variables through `env` instead of the
    /// process environment.
    ///
    /// # Errors
    /// See [`Config::load`]
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match path {
            Some(path) => Self::merge(Some(read_file(path)?), env),
            None => Self::load_default(&default_config_path(), env),
        }
    }

    fn load_default<F>(path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match read_file(path) {
            Ok(file) => Some(file),
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                None
            }
            Err(err) => return Err(err),
        };
        Self::merge(file, env)
    }

    fn merge<F>(file: Option<FileConfig>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(token) = file.token {
                config.token = token;
            }
            if let Some(home_id) = file.home_id {
                config.home_id = Some(home_id);
            }
            if let Some(format) = file.format {
                config.format = format;
            }
        }

        let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
        if let Some(token) = lookup(TOKEN_ENV) {
            config.token = token;
        }
        if let Some(home_id) = lookup(HOME_ID_ENV) {
            config.home_id = Some(home_id);
        }
        if let Some(format) = lookup(FORMAT_ENV) {
            config.format = format;
        }

        tracing::debug!(config = ?config, "loaded config");
        Ok(config)
    }

    /// Check that the config can be used to talk to the api.
    ///
    /// # Errors
    /// [`ConfigError::MissingToken`] if no token is set. `home_id` and `format` are not checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(())
    }

    /// The home to query: `explicit` if given, otherwise the configured default.
    pub fn home_id_or<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or(self.home_id.as_deref())
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_owned(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    let file: FileConfig = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_owned(),
        source,
    })?;
    for key in file.unknown.keys() {
        tracing::warn!(path = %path.display(), key = %key, "ignoring unknown config key");
    }
    Ok(file)
}

/// Where the config file is looked for when no path is given:
/// `<user config dir>/powerctl/config.yaml`.
///
/// The path is always absolute. Nothing is created on disk.
pub fn default_config_path() -> PathBuf {
    config_dir().join(APP_DIR).join(CONFIG_FILE)
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .filter(|dir| dir.is_absolute())
        .unwrap_or_else(std::env::temp_dir)
}
