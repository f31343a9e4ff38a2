//! Path management for Kantong
//!
//! ## Path Resolution Order
//!
//! 1. `KANTONG_DATA_DIR` environment variable (if set)
//! 2. Platform data directory from `directories::ProjectDirs`
//! 3. `./kantong` when no home directory can be determined

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::KantongError;
use crate::models::Month;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "KANTONG_DATA_DIR";

/// Manages all paths used by Kantong
#[derive(Debug, Clone)]
pub struct KantongPaths {
    /// Base directory for all Kantong data
    base_dir: PathBuf,
}

impl KantongPaths {
    /// Create a new KantongPaths instance using the resolution order above
    pub fn new() -> Result<Self, KantongError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path(),
        };

        Ok(Self { base_dir })
    }

    /// Create KantongPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// The single transaction file shared by all months
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transaksi.txt")
    }

    /// Budget category file for a month (`pos_MM.txt`)
    pub fn categories_file(&self, month: Month) -> PathBuf {
        self.data_dir().join(format!("pos_{}.txt", month.code()))
    }

    /// Analysis snapshot file for a month (`analisis_MM.txt`)
    pub fn analysis_file(&self, month: Month) -> PathBuf {
        self.data_dir().join(format!("analisis_{}.txt", month.code()))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), KantongError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KantongError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| KantongError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> PathBuf {
    ProjectDirs::from("id", "kantong", "kantong")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("kantong"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_month_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        let march = Month::new(3).unwrap();

        assert_eq!(
            paths.categories_file(march),
            temp_dir.path().join("data").join("pos_03.txt")
        );
        assert_eq!(
            paths.analysis_file(march),
            temp_dir.path().join("data").join("analisis_03.txt")
        );
        assert_eq!(
            paths.transactions_file(),
            temp_dir.path().join("data").join("transaksi.txt")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
