//! Directory configuration loaded from TOML.
//!
//! Every key is optional; a missing key falls back to its default:
//!
//! ```toml
//! id_strategy = "sequence"        # or "count_plus_one"
//! employee_join = "literal_id"    # or "dept_id"
//!
//! [database]
//! path = "/var/lib/orgdir/orgdir.db"   # absent: in-memory collections
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/orgdir"              # absent: stderr
//! ```

use crate::logging::default_log_level;
use crate::service::id_allocator::IdStrategy;
use crate::service::resolver::EmployeeJoin;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub id_strategy: IdStrategy,
    pub employee_join: EmployeeJoin,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` keeps all records in process memory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Configured level, or the build-mode default when unset.
    pub fn level_or_default(&self) -> &str {
        self.level.as_deref().unwrap_or(default_log_level())
    }
}

impl DirectoryConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
