//! Audit logging for Kantong
//!
//! Every create, update, delete and refresh performed by the services is
//! recorded in an append-only JSON-lines file next to the data directory.
//!
//! - `AuditEntry`: one operation with timestamp, entity and before/after values
//! - `AuditLogger`: appends entries to and reads them back from the log file
//! - `summarize_changes`: short description of the fields an update touched

mod diff;
mod entry;
mod logger;

pub use diff::summarize_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
