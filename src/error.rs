use crate::models::types::{NodeId, ZoneId};
use thiserror::Error;

pub type AppResult<T> = Result<T, MapError>;

/// Failures while building or loading map data. Navigation itself never fails;
/// its outcomes are reported through [`crate::state::session::Status`].
#[derive(Debug, Error)]
pub enum MapError {
    #[error("duplicate room #{node} in zone {zone}")]
    DuplicateNode { zone: ZoneId, node: NodeId },

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("invalid data in {file}: {message}")]
    InvalidData { file: String, message: String },

    #[error("file too large: {path} ({bytes} bytes)")]
    FileTooLarge { path: std::path::PathBuf, bytes: usize },

    #[error("import exceeds limit: {0}")]
    LimitExceeded(&'static str),

    #[error("no zone files found in {0}")]
    NoZones(std::path::PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no map configured (set MUDMAP_MAP or pass --map)")]
    MissingMap,
}
