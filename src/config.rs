use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILTER: &str = "info,mudmap=debug";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Zone file, or a directory of zone files
    pub map: Option<PathBuf>,
    /// Zone to start in (id or name). Defaults to the first loaded zone.
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: None,
            zone: None,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env");
        Self {
            map: std::env::var("MUDMAP_MAP").ok().map(PathBuf::from),
            zone: std::env::var("MUDMAP_ZONE").ok(),
            log_filter: std::env::var("MUDMAP_LOG").unwrap_or_else(|_| default_log_filter()),
        }
    }

    /// Values set in `other` win.
    pub fn merge(mut self, other: Config) -> Self {
        if other.map.is_some() {
            self.map = other.map;
        }
        if other.zone.is_some() {
            self.zone = other.zone;
        }
        if other.log_filter != DEFAULT_LOG_FILTER {
            self.log_filter = other.log_filter;
        }
        self
    }

    pub fn map_path(&self) -> Result<&Path, ConfigError> {
        self.map.as_deref().ok_or(ConfigError::MissingMap)
    }
}
