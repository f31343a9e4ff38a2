//! Core data models for Kantong
//!
//! This module contains the data structures of the personal finance domain:
//! transactions, budget categories, monthly analysis, money and months.

pub mod analysis;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod transaction;

pub use analysis::{Conclusion, FinancialCondition, MonthlyAnalysis};
pub use category::{Category, CategoryStatus, MAX_CATEGORY_NAME_LENGTH};
pub use ids::TransactionId;
pub use money::Money;
pub use period::Month;
pub use transaction::{Transaction, TransactionKind, DATE_FORMAT};
