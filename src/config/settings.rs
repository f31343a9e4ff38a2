//! User settings for Kantong
//!
//! Collection limits, record parsing strictness, and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::KantongPaths;
use crate::error::KantongError;
use crate::storage::codec::ParseMode;

/// User settings for Kantong
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Maximum number of transactions kept in the transaction file
    #[serde(default = "default_max_transactions")]
    pub max_transactions: usize,

    /// Maximum number of budget categories per month
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,

    /// Reject malformed numeric fields instead of reading them as zero
    #[serde(default)]
    pub strict_parsing: bool,

    /// Offer to copy last month's categories when a month has none
    #[serde(default = "default_copy_previous")]
    pub copy_previous_categories: bool,

    /// Currency symbol shown before amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_max_transactions() -> usize {
    1000
}

fn default_max_categories() -> usize {
    50
}

fn default_copy_previous() -> bool {
    true
}

fn default_currency() -> String {
    "Rp".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            max_transactions: default_max_transactions(),
            max_categories: default_max_categories(),
            strict_parsing: false,
            copy_previous_categories: default_copy_previous(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// How record lines should be decoded
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict_parsing {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &KantongPaths) -> Result<Self, KantongError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| KantongError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                KantongError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &KantongPaths) -> Result<(), KantongError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| KantongError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| KantongError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
