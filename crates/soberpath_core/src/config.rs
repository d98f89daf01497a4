//! Runtime configuration for console hosts.
//!
//! # Responsibility
//! - Resolve database location, logging and the acting role from the
//!   environment.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Invalid values are reported, never silently replaced.

use crate::db::DbLocation;
use crate::logging::LogLevel;
use crate::model::role::{parse_role, Role, UnknownRoleError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "SOBERPATH_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SOBERPATH_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SOBERPATH_LOG_DIR";
pub const ENV_ROLE: &str = "SOBERPATH_ROLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidRole(UnknownRoleError),
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(err) => write!(f, "{ENV_ROLE}: {err}"),
            Self::InvalidLogLevel(value) => write!(
                f,
                "{ENV_LOG_LEVEL}: unsupported level `{value}`; expected trace|debug|info|warn|error"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRole(err) => Some(err),
            Self::InvalidLogLevel(_) => None,
        }
    }
}

/// Host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    pub log_level: LogLevel,
    /// `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// Role passed to every visibility query.
    pub role: Role,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: LogLevel::for_build(),
            log_dir: None,
            role: Role::RehabAdmin,
        }
    }
}

impl ConsoleConfig {
    /// Database the host should open.
    pub fn db_location(&self) -> DbLocation {
        self.db_path
            .clone()
            .map_or(DbLocation::Memory, DbLocation::File)
    }

    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = value(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = value(ENV_LOG_LEVEL) {
            config.log_level =
                LogLevel::parse(&level).ok_or(ConfigError::InvalidLogLevel(level))?;
        }
        if let Some(dir) = value(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(role) = value(ENV_ROLE) {
            config.role = parse_role(&role).map_err(ConfigError::InvalidRole)?;
        }
        Ok(config)
    }
}
