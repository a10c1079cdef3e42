//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve note capacity and snapshot database path from the environment.
//!
//! # Invariants
//! - Resolution never fails; invalid values fall back to defaults with a warning.
//! - Resolved capacity is always at least 1.

use crate::store::note_store::DEFAULT_CAPACITY;
use log::warn;
use std::path::PathBuf;

/// Environment variable overriding the snapshot database path.
pub const DB_PATH_ENV: &str = "SCRIPPLE_DB_PATH";
/// Environment variable overriding the note capacity.
pub const CAPACITY_ENV: &str = "SCRIPPLE_CAPACITY";

const DB_FILE_NAME: &str = "scripple.sqlite3";

/// Host-facing configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Maximum number of notes held by the store.
    pub capacity: usize,
    /// SQLite file holding the persisted snapshot slot.
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
        }
    }
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(DB_PATH_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                config.db_path = PathBuf::from(trimmed);
            }
        }

        if let Some(raw) = lookup(CAPACITY_ENV) {
            match parse_capacity(&raw) {
                Some(capacity) => config.capacity = capacity,
                None => warn!(
                    "event=config_resolve module=config status=fallback key={} default={}",
                    CAPACITY_ENV, DEFAULT_CAPACITY
                ),
            }
        }

        config
    }
}

fn parse_capacity(raw: &str) -> Option<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, CAPACITY_ENV, DB_PATH_ENV};
    use crate::store::note_store::DEFAULT_CAPACITY;
    use std::path::PathBuf;

    #[test]
    fn missing_variables_use_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn variables_override_defaults() {
        let config = AppConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some(" /data/scripple.db ".to_string()),
            CAPACITY_ENV => Some("6".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/scripple.db"));
        assert_eq!(config.capacity, 6);
    }

    #[test]
    fn invalid_capacity_falls_back_to_default() {
        for raw in ["0", "-3", "many", ""] {
            let config = AppConfig::from_lookup(|name| {
                (name == CAPACITY_ENV).then(|| raw.to_string())
            });
            assert_eq!(config.capacity, DEFAULT_CAPACITY, "raw value `{raw}`");
        }
    }
}
