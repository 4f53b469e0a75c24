//! Runtime configuration for catalog front ends.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - Logging stays disabled unless a log directory is configured.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "BANDBOOK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "BANDBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BANDBOOK_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "bandbook.sqlite3";

/// Resolved catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CatalogConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, DB_PATH_ENV, DEFAULT_DB_FILE_NAME, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = CatalogConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/tmp/rock.sqlite3"),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/tmp/bandbook-logs"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/rock.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/bandbook-logs")));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = CatalogConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  "), (LOG_DIR_ENV, "")]));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert!(config.log_dir.is_none());
    }
}
