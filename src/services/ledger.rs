//! Ledger service
//!
//! Records, edits and deletes transactions. Every mutation is followed by a
//! budget recalculation of the affected month(s) and an audit entry.

use chrono::NaiveDate;

use crate::audit::{summarize_changes, EntityType};
use crate::error::{KantongError, KantongResult};
use crate::models::{Money, Month, Transaction, TransactionId, TransactionKind};
use crate::services::validation;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Default size of the transaction file
pub const DEFAULT_MAX_TRANSACTIONS: usize = 1000;

/// Service for transaction management
pub struct LedgerService<'a> {
    storage: &'a Storage,
    max_transactions: usize,
}

/// Input for recording a transaction
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    /// Date as typed, `dd-mm-yyyy`
    pub date: String,
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub note: String,
}

/// Fields to change on an existing transaction; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    pub date: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub note: Option<String>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.note.is_none()
    }
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
        }
    }

    /// Override the transaction file limit
    pub fn with_limit(mut self, max_transactions: usize) -> Self {
        self.max_transactions = max_transactions;
        self
    }

    fn recalculate(&self, month: Month) -> KantongResult<()> {
        BudgetService::new(self.storage).recalculate_month(month)?;
        Ok(())
    }

    /// Record a new transaction
    ///
    /// Checks run in order: date, category, amount, note, then the file limit.
    pub fn add(&self, input: NewTransaction) -> KantongResult<Transaction> {
        let date = validation::parse_date(input.date.trim())?;
        let category = validation::category_reference(&input.category)?;
        validation::amount(input.amount)?;
        let note = validation::note(&input.note)?;

        if self.storage.transactions.count()? >= self.max_transactions {
            return Err(KantongError::CapacityExceeded {
                entity_type: "transaksi",
                limit: self.max_transactions,
            });
        }

        let transaction = Transaction {
            id: self.storage.transactions.next_id()?,
            date,
            kind: input.kind,
            category,
            amount: input.amount,
            note,
        };

        self.storage.transactions.add(transaction.clone())?;
        self.recalculate(transaction.month())?;

        self.storage.log_create(
            EntityType::Transaction,
            transaction.id.to_string(),
            Some(transaction.category.clone()),
            &transaction,
        )?;

        Ok(transaction)
    }

    /// Change fields of an existing transaction
    ///
    /// Each supplied field is validated on its own. When the date moves the
    /// transaction to another month, both months are recalculated.
    pub fn edit(&self, id: TransactionId, patch: TransactionPatch) -> KantongResult<Transaction> {
        let before = self.get(id)?;
        if patch.is_empty() {
            return Ok(before);
        }

        let mut transaction = before.clone();

        if let Some(date) = patch.date.as_deref() {
            transaction.date = validation::parse_date(date.trim())?;
        }
        if let Some(kind) = patch.kind {
            transaction.kind = kind;
        }
        if let Some(category) = patch.category.as_deref() {
            transaction.category = validation::category_reference(category)?;
        }
        if let Some(amount) = patch.amount {
            validation::amount(amount)?;
            transaction.amount = amount;
        }
        if let Some(note) = patch.note.as_deref() {
            transaction.note = validation::note(note)?;
        }

        self.storage.transactions.update(id, transaction.clone())?;

        self.recalculate(before.month())?;
        if transaction.month() != before.month() {
            self.recalculate(transaction.month())?;
        }

        self.storage.log_update(
            EntityType::Transaction,
            id.to_string(),
            Some(transaction.category.clone()),
            &before,
            &transaction,
            summarize_changes(&before, &transaction),
        )?;

        Ok(transaction)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> KantongResult<Transaction> {
        let removed = self.storage.transactions.delete(id)?;
        self.recalculate(removed.month())?;

        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            Some(removed.category.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> KantongResult<Transaction> {
        self.storage
            .transactions
            .find_by_id(id)?
            .ok_or_else(|| KantongError::transaction_not_found(id.to_string()))
    }

    /// Transactions in file order, optionally limited to one month
    pub fn list(&self, month: Option<Month>) -> KantongResult<Vec<Transaction>> {
        match month {
            Some(month) => self.storage.transactions.load_month(month),
            None => self.storage.transactions.load_all(),
        }
    }

    fn total(&self, month: Month, kind: TransactionKind) -> KantongResult<Money> {
        Ok(self
            .list(Some(month))?
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum())
    }

    /// Sum of income in the month
    pub fn total_income(&self, month: Month) -> KantongResult<Money> {
        self.total(month, TransactionKind::Income)
    }

    /// Sum of expense in the month
    pub fn total_expense(&self, month: Month) -> KantongResult<Money> {
        self.total(month, TransactionKind::Expense)
    }

    /// Number of transactions in the month, optionally of one kind
    pub fn count(&self, month: Month, kind: Option<TransactionKind>) -> KantongResult<usize> {
        Ok(self
            .list(Some(month))?
            .iter()
            .filter(|t| kind.map_or(true, |k| t.kind == k))
            .count())
    }

    /// Reject a date outside the month being worked on
    pub fn ensure_in_month(&self, date: NaiveDate, month: Month) -> KantongResult<()> {
        validation::ensure_in_month(date, month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KantongPaths;
    use crate::services::CategoryService;
    use crate::storage::ParseMode;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, ParseMode::Lenient).unwrap();
        (temp_dir, storage)
    }

    fn march() -> Month {
        Month::new(3).unwrap()
    }

    fn input(date: &str, kind: TransactionKind, category: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            date: date.into(),
            kind,
            category: category.into(),
            amount: Money::from_rupiah(amount),
            note: String::new(),
        }
    }

    fn expense(date: &str, category: &str, amount: i64) -> NewTransaction {
        input(date, TransactionKind::Expense, category, amount)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);

        let first = ledger.add(expense("01-03-2025", "Makan", 10_000)).unwrap();
        let second = ledger.add(expense("02-03-2025", "Makan", 5_000)).unwrap();

        assert_eq!(first.id.to_string(), "T0001");
        assert_eq!(second.id.to_string(), "T0002");
        assert_eq!(ledger.list(None).unwrap().len(), 2);
        assert_eq!(storage.audit().entry_count().unwrap(), 2);
    }

    #[test]
    fn test_add_gate_order() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);

        let mut bad = expense("31-02-2025", "", 0);
        bad.note = "x|y".into();
        assert_eq!(
            ledger.add(bad.clone()).unwrap_err().user_message(),
            "Tanggal tidak valid"
        );

        bad.date = "28-02-2025".into();
        assert_eq!(
            ledger.add(bad.clone()).unwrap_err().user_message(),
            "Pos anggaran harus dipilih"
        );

        bad.category = "Makan".into();
        assert_eq!(
            ledger.add(bad.clone()).unwrap_err().user_message(),
            "Nominal harus lebih dari 0"
        );

        bad.amount = Money::from_rupiah(1);
        assert_eq!(
            ledger.add(bad).unwrap_err().user_message(),
            "Deskripsi tidak boleh mengandung karakter |"
        );

        assert!(ledger.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_add_respects_limit() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage).with_limit(1);

        ledger.add(expense("01-03-2025", "Makan", 1)).unwrap();
        let result = ledger.add(expense("01-04-2025", "Makan", 1));
        assert!(matches!(
            result,
            Err(KantongError::CapacityExceeded { limit: 1, .. })
        ));
    }

    #[test]
    fn test_add_recalculates_budget() {
        let (_temp, storage) = create_test_storage();
        CategoryService::new(&storage)
            .add(march(), "Makan", Money::from_rupiah(50_000))
            .unwrap();
        let ledger = LedgerService::new(&storage);

        ledger.add(expense("05-03-2025", "makan", 60_000)).unwrap();

        let makan = storage.categories.find_by_number(march(), 1).unwrap().unwrap();
        assert_eq!(makan.realized, Money::from_rupiah(60_000));
        assert!(makan.remaining.is_negative());
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let (_temp, storage) = create_test_storage();
        CategoryService::new(&storage)
            .add(march(), "Makan", Money::from_rupiah(50_000))
            .unwrap();
        let ledger = LedgerService::new(&storage);
        let huge = Money::parse("9000000000000000000").unwrap();

        for date in ["05-03-2025", "06-03-2025"] {
            ledger
                .add(NewTransaction {
                    amount: huge,
                    ..expense(date, "Makan", 1)
                })
                .unwrap();
        }

        let makan = storage.categories.find_by_number(march(), 1).unwrap().unwrap();
        assert_eq!(makan.realized, Money::from_rupiah(i64::MAX));
        assert!(makan.remaining.is_negative());
    }

    #[test]
    fn test_note_with_line_break_writes_nothing() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);

        let mut txn = expense("05-03-2025", "Makan", 100);
        txn.note = "beli\nT0009".into();
        assert!(matches!(ledger.add(txn), Err(KantongError::Validation(_))));
        assert!(ledger.list(None).unwrap().is_empty());
    }

    #[test]
    fn test_edit_moves_between_months() {
        let (_temp, storage) = create_test_storage();
        let categories = CategoryService::new(&storage);
        categories
            .add(march(), "Makan", Money::from_rupiah(100))
            .unwrap();
        categories
            .add(Month::new(4).unwrap(), "Makan", Money::from_rupiah(100))
            .unwrap();
        let ledger = LedgerService::new(&storage);
        let txn = ledger.add(expense("05-03-2025", "Makan", 40)).unwrap();

        let edited = ledger
            .edit(
                txn.id,
                TransactionPatch {
                    date: Some("06-04-2025".into()),
                    amount: Some(Money::from_rupiah(70)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.month().number(), 4);
        assert_eq!(edited.id, txn.id);

        let in_march = storage.categories.find_by_number(march(), 1).unwrap().unwrap();
        assert_eq!(in_march.realized, Money::zero());
        let in_april = storage
            .categories
            .find_by_number(Month::new(4).unwrap(), 1)
            .unwrap()
            .unwrap();
        assert_eq!(in_april.realized, Money::from_rupiah(70));
    }

    #[test]
    fn test_edit_validates_touched_fields() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);
        let txn = ledger.add(expense("05-03-2025", "Makan", 40)).unwrap();

        let result = ledger.edit(
            txn.id,
            TransactionPatch {
                amount: Some(Money::zero()),
                ..Default::default()
            },
        );
        assert!(result.unwrap_err().is_validation());

        let result = ledger.edit(
            txn.id,
            TransactionPatch {
                note: Some("n".repeat(51)),
                ..Default::default()
            },
        );
        assert!(result.unwrap_err().is_validation());

        // unchanged on failure
        assert_eq!(ledger.get(txn.id).unwrap(), txn);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);
        let txn = ledger.add(expense("05-03-2025", "Makan", 40)).unwrap();

        let same = ledger.edit(txn.id, TransactionPatch::default()).unwrap();
        assert_eq!(same, txn);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);
        let txn = ledger.add(expense("05-03-2025", "Makan", 40)).unwrap();

        let removed = ledger.delete(txn.id).unwrap();
        assert_eq!(removed.id, txn.id);
        assert!(ledger.get(txn.id).unwrap_err().is_not_found());
        assert!(ledger.delete(txn.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_totals_and_counts() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);
        ledger
            .add(input("01-03-2025", TransactionKind::Income, "Kiriman", 1_000_000))
            .unwrap();
        ledger.add(expense("02-03-2025", "Makan", 25_000)).unwrap();
        ledger.add(expense("03-03-2025", "Kos", 500_000)).unwrap();
        ledger.add(expense("03-04-2025", "Kos", 500_000)).unwrap();

        assert_eq!(
            ledger.total_income(march()).unwrap(),
            Money::from_rupiah(1_000_000)
        );
        assert_eq!(
            ledger.total_expense(march()).unwrap(),
            Money::from_rupiah(525_000)
        );
        assert_eq!(ledger.count(march(), None).unwrap(), 3);
        assert_eq!(
            ledger
                .count(march(), Some(TransactionKind::Expense))
                .unwrap(),
            2
        );
        assert_eq!(ledger.list(Some(march())).unwrap().len(), 3);
    }

    #[test]
    fn test_ensure_in_month() {
        let (_temp, storage) = create_test_storage();
        let ledger = LedgerService::new(&storage);
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();

        assert!(ledger.ensure_in_month(date, Month::new(4).unwrap()).is_ok());
        assert!(ledger
            .ensure_in_month(date, march())
            .unwrap_err()
            .is_validation());
    }
}
