//! Transaction store backed by `transaksi.txt`
//!
//! All months share one file. Every call reloads the file; mutations rewrite
//! it in full.

use std::path::PathBuf;

use crate::error::{KantongError, KantongResult};
use crate::models::{Month, Transaction, TransactionId};

use super::codec::{decode_all, encode_all, ParseMode};
use super::file_io::{read_lines, write_lines_atomic};

/// Repository for transaction persistence
pub struct TransactionStore {
    path: PathBuf,
    mode: ParseMode,
}

impl TransactionStore {
    /// Create a new transaction store
    pub fn new(path: PathBuf, mode: ParseMode) -> Self {
        Self { path, mode }
    }

    /// Path of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load every transaction in file order
    pub fn load_all(&self) -> KantongResult<Vec<Transaction>> {
        decode_all(&read_lines(&self.path)?, self.mode)
    }

    /// Load transactions whose date falls in the given month (any year)
    pub fn load_month(&self, month: Month) -> KantongResult<Vec<Transaction>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|t| t.month() == month)
            .collect())
    }

    /// Replace the whole file
    pub fn save_all(&self, transactions: &[Transaction]) -> KantongResult<()> {
        write_lines_atomic(&self.path, &encode_all(transactions))
    }

    /// Number of stored transactions across all months
    pub fn count(&self) -> KantongResult<usize> {
        Ok(self.load_all()?.len())
    }

    /// Find a transaction by ID
    pub fn find_by_id(&self, id: TransactionId) -> KantongResult<Option<Transaction>> {
        Ok(self.load_all()?.into_iter().find(|t| t.id == id))
    }

    /// The ID after the highest one in use (`T0001` for an empty file)
    pub fn next_id(&self) -> KantongResult<TransactionId> {
        Ok(self
            .load_all()?
            .iter()
            .map(|t| t.id)
            .max()
            .map(|id| id.next())
            .unwrap_or(TransactionId::new(1)))
    }

    /// Append a transaction
    pub fn add(&self, transaction: Transaction) -> KantongResult<()> {
        let mut all = self.load_all()?;
        if all.iter().any(|t| t.id == transaction.id) {
            return Err(KantongError::Duplicate {
                entity_type: "Transaksi",
                identifier: transaction.id.to_string(),
            });
        }
        all.push(transaction);
        self.save_all(&all)
    }

    /// Replace the transaction with the given ID, keeping its position
    pub fn update(&self, id: TransactionId, transaction: Transaction) -> KantongResult<()> {
        let mut all = self.load_all()?;
        let slot = all
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| KantongError::transaction_not_found(id.to_string()))?;
        *slot = transaction;
        self.save_all(&all)
    }

    /// Remove a transaction, returning it
    pub fn delete(&self, id: TransactionId) -> KantongResult<Transaction> {
        let mut all = self.load_all()?;
        let index = all
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| KantongError::transaction_not_found(id.to_string()))?;
        let removed = all.remove(index);
        self.save_all(&all)?;
        Ok(removed)
    }

    /// Number of transactions (either kind) in a month referencing a category
    pub fn count_by_category(&self, month: Month, name: &str) -> KantongResult<u32> {
        let count = self
            .load_month(month)?
            .iter()
            .filter(|t| t.matches_category(name))
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, TransactionStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transaksi.txt");
        (temp_dir, TransactionStore::new(path, ParseMode::Lenient))
    }

    fn txn(id: u32, day: u32, month: u32, kind: TransactionKind, category: &str, amount: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            date: NaiveDate::from_ymd_opt(2025, month, day).unwrap(),
            kind,
            category: category.into(),
            amount: Money::from_rupiah(amount),
            note: String::new(),
        }
    }

    #[test]
    fn test_empty_store() {
        let (_temp, store) = create_test_store();
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(store.next_id().unwrap(), TransactionId::new(1));
    }

    #[test]
    fn test_add_and_find() {
        let (_temp, store) = create_test_store();
        store
            .add(txn(1, 5, 3, TransactionKind::Expense, "Makan", 20_000))
            .unwrap();

        let found = store.find_by_id(TransactionId::new(1)).unwrap().unwrap();
        assert_eq!(found.category, "Makan");
        assert_eq!(store.next_id().unwrap(), TransactionId::new(2));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let (_temp, store) = create_test_store();
        store
            .add(txn(1, 5, 3, TransactionKind::Expense, "Makan", 1))
            .unwrap();
        let err = store
            .add(txn(1, 6, 3, TransactionKind::Expense, "Makan", 2))
            .unwrap_err();
        assert!(matches!(err, KantongError::Duplicate { .. }));
    }

    #[test]
    fn test_next_id_uses_max_not_count() {
        let (_temp, store) = create_test_store();
        store
            .save_all(&[
                txn(7, 1, 1, TransactionKind::Income, "Gaji", 1),
                txn(3, 1, 1, TransactionKind::Income, "Gaji", 1),
            ])
            .unwrap();
        assert_eq!(store.next_id().unwrap(), TransactionId::new(8));
    }

    #[test]
    fn test_load_month_filters_by_month() {
        let (_temp, store) = create_test_store();
        store
            .save_all(&[
                txn(1, 1, 3, TransactionKind::Income, "Gaji", 1),
                txn(2, 2, 4, TransactionKind::Expense, "Makan", 1),
                txn(3, 9, 3, TransactionKind::Expense, "Makan", 1),
            ])
            .unwrap();

        let march = store.load_month(Month::new(3).unwrap()).unwrap();
        assert_eq!(march.len(), 2);
        assert!(march.iter().all(|t| t.month().number() == 3));
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp, store) = create_test_store();
        store
            .add(txn(1, 5, 3, TransactionKind::Expense, "Makan", 20_000))
            .unwrap();

        let mut changed = store.find_by_id(TransactionId::new(1)).unwrap().unwrap();
        changed.amount = Money::from_rupiah(30_000);
        store.update(TransactionId::new(1), changed).unwrap();
        assert_eq!(
            store.find_by_id(TransactionId::new(1)).unwrap().unwrap().amount,
            Money::from_rupiah(30_000)
        );

        let removed = store.delete(TransactionId::new(1)).unwrap();
        assert_eq!(removed.id, TransactionId::new(1));
        assert!(store.delete(TransactionId::new(1)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_count_by_category_counts_both_kinds() {
        let (_temp, store) = create_test_store();
        store
            .save_all(&[
                txn(1, 1, 3, TransactionKind::Income, "makan", 1),
                txn(2, 2, 3, TransactionKind::Expense, "Makan", 1),
                txn(3, 2, 4, TransactionKind::Expense, "Makan", 1),
            ])
            .unwrap();
        assert_eq!(store.count_by_category(Month::new(3).unwrap(), "MAKAN").unwrap(), 2);
    }

    #[test]
    fn test_corrupt_lines_skipped() {
        let (_temp, store) = create_test_store();
        std::fs::write(
            store.path(),
            "T0001|01-03-2025|Pengeluaran|Makan|100|\nnot a record\n",
        )
        .unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
