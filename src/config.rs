//! Run configuration, read from a TOML file.
//!
//! ```toml
//! input = "dataset/input.txt"
//! output = "dataset/output.txt"
//! root = 1
//! root_strategy = "source"
//! strict = false
//! verify = false
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::analysis::root::RootStrategy;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Edge-list dataset to analyze
    pub input: Option<PathBuf>,
    /// Where to write the records; stdout when absent
    pub output: Option<PathBuf>,
    /// Explicit root. Overrides `root_strategy`.
    pub root: Option<u64>,
    #[serde(default)]
    pub root_strategy: RootStrategy,
    /// Fail when some declared node is unreachable from the root
    #[serde(default)]
    pub strict: bool,
    /// Re-check the result by brute force
    #[serde(default)]
    pub verify: bool,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {0} not found")]
    NotFound(String),
    #[error("config file {0} is not valid UTF-8 text")]
    InvalidEncoding(String),
    #[error("cannot read config file {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("config file fails to parse")]
    Parse(#[from] toml::de::Error),
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Attempting to parse: {}", path.display());

        let content = fs::read_to_string(path).map_err(|err| {
            let path = path.display().to_string();
            match err.kind() {
                io::ErrorKind::NotFound => ConfigError::NotFound(path),
                io::ErrorKind::InvalidData => ConfigError::InvalidEncoding(path),
                _ => ConfigError::Io { path, source: err },
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
