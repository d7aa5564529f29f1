//! Runtime configuration for planner front ends.
//!
//! # Invariants
//! - Defaults never touch the filesystem; paths are only resolved here.
//! - `log_dir = None` means file logging stays off.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "study-planner.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// SQLite file holding both namespace keys.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PlannerConfig {
    /// Overlays explicitly provided values on top of the defaults.
    pub fn with_overrides(
        db_path: Option<PathBuf>,
        log_level: Option<String>,
        log_dir: Option<PathBuf>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            db_path: db_path.unwrap_or(defaults.db_path),
            log_level: log_level
                .filter(|level| !level.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_dir: log_dir.or(defaults.log_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlannerConfig, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn overrides_replace_only_provided_values() {
        let config = PlannerConfig::with_overrides(None, Some("warn".to_string()), None);
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        let config = PlannerConfig::with_overrides(None, Some("  ".to_string()), None);
        assert_eq!(config.log_level, PlannerConfig::default().log_level);
    }
}
