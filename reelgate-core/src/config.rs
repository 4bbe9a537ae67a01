//! Runtime configuration.
//!
//! Sources, later ones winning:
//!
//! 1. built-in defaults (platform data directory, public TMDB endpoints,
//!    10s request timeout);
//! 2. a TOML file: `$REELGATE_CONFIG`, or `config.toml` in the platform
//!    config directory;
//! 3. a `.env` file in the working directory (never overrides variables that
//!    are already set);
//! 4. environment variables.
//!
//! Blank values are treated as unset everywhere.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const DEFAULT_TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_CONFIG_PATH: &str = "REELGATE_CONFIG";
pub const ENV_DATA_DIR: &str = "REELGATE_DATA_DIR";
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_TMDB_API_BASE: &str = "REELGATE_TMDB_API_BASE";
pub const ENV_REQUEST_TIMEOUT: &str = "REELGATE_REQUEST_TIMEOUT";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid duration for {key}: '{value}'")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: humantime::DurationError,
    },
    #[error("invalid URL for {key}: '{value}'")]
    InvalidUrl {
        key: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unable to determine a data directory; set {ENV_DATA_DIR}")]
    NoDataDir,
}

/// Settings for the metadata lookup backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConfig {
    pub api_key: Option<String>,
    pub api_base: Url,
    pub image_base: Url,
    pub request_timeout: Duration,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding persisted state.
    pub data_dir: PathBuf,
    pub metadata: MetadataConfig,
    /// Config file that contributed values, if any.
    pub config_file: Option<PathBuf>,
}

/// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub tmdb_api_key: Option<String>,
    pub tmdb_api_base: Option<String>,
    pub tmdb_image_base: Option<String>,
    pub request_timeout: Option<String>,
}

/// Builder that gathers configuration sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    vars: Option<HashMap<String, String>>,
    skip_dotenv: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this config file instead of the default location. A missing
    /// explicit file is an error.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Use these variables instead of the process environment. Also skips
    /// `.env` loading.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self.skip_dotenv = true;
        self
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.skip_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "loaded .env file"),
                Err(err) if err.not_found() => {}
                Err(err) => debug!(error = %err, "ignoring unreadable .env file"),
            }
        }

        let dirs = ProjectDirs::from("", "reelgate", "reelgate");

        let (file, config_file) = self.read_file(dirs.as_ref())?;

        let data_dir = self
            .var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .or(file.data_dir)
            .or_else(|| dirs.as_ref().map(|d| d.data_dir().to_path_buf()))
            .ok_or(ConfigError::NoDataDir)?;

        let api_key = self.var(ENV_TMDB_API_KEY).or(non_blank(file.tmdb_api_key));

        let api_base = match self.var(ENV_TMDB_API_BASE) {
            Some(value) => parse_url(ENV_TMDB_API_BASE, &value)?,
            None => match non_blank(file.tmdb_api_base) {
                Some(value) => parse_url("tmdb_api_base", &value)?,
                None => parse_url("tmdb_api_base", DEFAULT_TMDB_API_BASE)?,
            },
        };

        let image_base = match non_blank(file.tmdb_image_base) {
            Some(value) => parse_url("tmdb_image_base", &value)?,
            None => parse_url("tmdb_image_base", DEFAULT_TMDB_IMAGE_BASE)?,
        };

        let request_timeout = match self.var(ENV_REQUEST_TIMEOUT) {
            Some(value) => parse_duration(ENV_REQUEST_TIMEOUT, &value)?,
            None => match non_blank(file.request_timeout) {
                Some(value) => parse_duration("request_timeout", &value)?,
                None => DEFAULT_REQUEST_TIMEOUT,
            },
        };

        Ok(AppConfig {
            data_dir,
            metadata: MetadataConfig {
                api_key,
                api_base,
                image_base,
                request_timeout,
            },
            config_file,
        })
    }

    fn var(&self, key: &str) -> Option<String> {
        let raw = match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        non_blank(raw)
    }

    fn read_file(
        &self,
        dirs: Option<&ProjectDirs>,
    ) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        let explicit = self
            .config_path
            .clone()
            .or_else(|| self.var(ENV_CONFIG_PATH).map(PathBuf::from));

        let path = match explicit {
            Some(path) => path,
            None => match dirs {
                Some(dirs) => {
                    let path = dirs.config_dir().join(CONFIG_FILE_NAME);
                    if !path.exists() {
                        return Ok((FileConfig::default(), None));
                    }
                    path
                }
                None => return Ok((FileConfig::default(), None)),
            },
        };

        let file = parse_file(&path)?;
        debug!(path = %path.display(), "loaded config file");
        Ok((file, Some(path)))
    }
}

fn parse_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
        source,
    })
}

fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|source| {
        ConfigError::InvalidDuration {
            key,
            value: value.to_string(),
            source,
        }
    })
}
