//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display,
//! including tables and summaries.

pub mod analysis;
pub mod category;
pub mod transaction;

pub use analysis::format_analysis_report;
pub use category::{format_category_details, format_category_table, format_month_summary};
pub use transaction::{
    format_transaction_details, format_transaction_summary, format_transaction_table, kind_marker,
};
