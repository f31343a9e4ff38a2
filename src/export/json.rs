//! JSON Export functionality
//!
//! Exports everything recorded for one month as a single JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Month, MonthlyAnalysis, Transaction};
use crate::services::{AnalysisService, CategoryService, LedgerService};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// All data of one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Month number, 1-12
    pub month: u8,

    pub transactions: Vec<Transaction>,

    /// Categories with recalculated derived fields
    pub categories: Vec<Category>,

    /// Analysis computed at export time
    pub analysis: MonthlyAnalysis,
}

impl MonthExport {
    /// Gather a month's data from storage
    pub fn from_storage(storage: &Storage, month: Month) -> KantongResult<Self> {
        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month: month.number(),
            transactions: LedgerService::new(storage).list(Some(month))?,
            categories: CategoryService::new(storage).list(month)?,
            analysis: AnalysisService::new(storage).compute(month)?,
        })
    }
}

/// Export a month to JSON
pub fn export_month_json<W: Write>(
    storage: &Storage,
    month: Month,
    writer: &mut W,
    pretty: bool,
) -> KantongResult<()> {
    let export = MonthExport::from_storage(storage, month)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| KantongError::Export(format!("Failed to write JSON: {}", e)))?;

    writeln!(writer).map_err(|e| KantongError::Export(e.to_string()))?;
    Ok(())
}
