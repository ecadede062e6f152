use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides the platform data directory.
pub(crate) const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";
/// Log filter directives, e.g. `expense_tracker=debug`. Falls back to `RUST_LOG`.
pub(crate) const LOG_FILTER_ENV: &str = "EXPENSE_TRACKER_LOG";

const DEFAULT_LOG_FILTER: &str = "expense_tracker=info";
const DB_FILE: &str = "expense-tracker.db";
const LOG_FILE: &str = "expense-tracker.log";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_filter: String,
}

impl Config {
    /// Resolve from the environment, creating the data directory if needed.
    pub(crate) fn load() -> Result<Self> {
        let data_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let proj_dirs =
                    directories::ProjectDirs::from("com", "expense-tracker", "ExpenseTracker")
                        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
                proj_dirs.data_dir().to_path_buf()
            }
        };
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let log_filter = std::env::var(LOG_FILTER_ENV)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Self::with_data_dir(data_dir, log_filter))
    }

    pub(crate) fn with_data_dir(data_dir: impl AsRef<Path>, log_filter: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            log_filter: log_filter.into(),
        }
    }

    pub(crate) fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_paths_live_in_data_dir() {
        let config = Config::with_data_dir("/tmp/et", "expense_tracker=debug");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/et/expense-tracker.db"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/et/expense-tracker.log"));
        assert_eq!(config.log_filter, "expense_tracker=debug");
    }
}
