//! Export module for Kantong
//!
//! - CSV: a month's transactions or categories (spreadsheet-compatible)
//! - JSON: everything recorded for a month in one document

pub mod csv;
pub mod json;

pub use self::csv::{export_categories_csv, export_transactions_csv};
pub use self::json::{export_month_json, MonthExport, EXPORT_SCHEMA_VERSION};
