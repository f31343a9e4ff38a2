//! Storage layer for Kantong
//!
//! Flat pipe-delimited text files under `<base>/data/`. Nothing is cached:
//! each operation reads the file it needs and mutations rewrite the whole
//! file atomically.

pub mod analysis;
pub mod categories;
pub mod codec;
pub mod file_io;
pub mod transactions;

pub use analysis::AnalysisStore;
pub use categories::CategoryStore;
pub use codec::{format_line, parse_line, LineRecord, ParseMode};
pub use file_io::{read_lines, write_lines_atomic};
pub use transactions::TransactionStore;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::KantongPaths;
use crate::error::KantongResult;

/// Storage coordinator that provides access to all stores and the audit log
pub struct Storage {
    paths: KantongPaths,
    pub transactions: TransactionStore,
    pub categories: CategoryStore,
    pub analysis: AnalysisStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: KantongPaths, mode: ParseMode) -> KantongResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionStore::new(paths.transactions_file(), mode),
            categories: CategoryStore::new(paths.clone(), mode),
            analysis: AnalysisStore::new(paths.clone(), mode),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &KantongPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> KantongResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> KantongResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> KantongResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a refresh of derived data
    pub fn log_refresh<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        snapshot: &T,
    ) -> KantongResult<()> {
        self.audit
            .log(&AuditEntry::refresh(entity_type, entity_id, None, snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, ParseMode::Lenient).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.audit().exists());
    }

    #[test]
    fn test_log_helpers_append() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, ParseMode::Lenient).unwrap();

        storage
            .log_create(EntityType::Category, "03/1", Some("Makan".into()), &"x")
            .unwrap();
        storage
            .log_refresh(EntityType::Analysis, "03", &"y")
            .unwrap();

        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }
}
