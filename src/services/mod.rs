//! Service layer for Kantong
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, derived budget fields, and audit logging.

pub mod analysis;
pub mod budget;
pub mod category;
pub mod ledger;
pub mod validation;

pub use analysis::AnalysisService;
pub use budget::{BudgetService, MonthSummary};
pub use category::{CategoryPatch, CategoryService, MonthPreparation};
pub use ledger::{LedgerService, NewTransaction, TransactionPatch};
