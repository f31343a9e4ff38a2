//! Analysis service
//!
//! Computes a month's financial snapshot from its transactions and keeps the
//! last computed snapshot on disk.

use crate::audit::EntityType;
use crate::error::KantongResult;
use crate::models::{Conclusion, FinancialCondition, Money, Month, MonthlyAnalysis};
use crate::storage::Storage;

/// Service for monthly financial analysis
pub struct AnalysisService<'a> {
    storage: &'a Storage,
}

impl<'a> AnalysisService<'a> {
    /// Create a new analysis service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Compute the month's snapshot without saving it
    pub fn compute(&self, month: Month) -> KantongResult<MonthlyAnalysis> {
        let transactions = self.storage.transactions.load_month(month)?;

        let mut income = Money::zero();
        let mut expense = Money::zero();
        let mut income_count = 0u32;
        let mut expense_count = 0u32;

        for txn in &transactions {
            if txn.is_income() {
                income += txn.amount;
                income_count += 1;
            } else {
                expense += txn.amount;
                expense_count += 1;
            }
        }

        Ok(MonthlyAnalysis::from_totals(
            income,
            expense,
            income_count,
            expense_count,
        ))
    }

    /// Compute and persist the month's snapshot
    pub fn refresh(&self, month: Month) -> KantongResult<MonthlyAnalysis> {
        let analysis = self.compute(month)?;
        self.storage.analysis.save(month, &analysis)?;
        self.storage
            .log_refresh(EntityType::Analysis, month.code(), &analysis)?;
        Ok(analysis)
    }

    /// The last persisted snapshot, which may predate recent transactions
    pub fn load(&self, month: Month) -> KantongResult<Option<MonthlyAnalysis>> {
        self.storage.analysis.load(month)
    }

    /// The persisted snapshot, or an all-zero one
    pub fn load_or_default(&self, month: Month) -> KantongResult<MonthlyAnalysis> {
        Ok(self.load(month)?.unwrap_or_default())
    }

    /// Write a zeroed snapshot if the month has none
    pub fn init_month(&self, month: Month) -> KantongResult<()> {
        self.storage.analysis.init_month(month)
    }

    pub fn determine_condition(income: Money, expense: Money) -> FinancialCondition {
        FinancialCondition::determine(income, expense)
    }

    pub fn determine_conclusion(remaining_percent: f64) -> Conclusion {
        Conclusion::determine(remaining_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::KantongPaths;
    use crate::models::TransactionKind;
    use crate::services::{LedgerService, NewTransaction};
    use crate::storage::ParseMode;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, ParseMode::Lenient).unwrap();
        (temp_dir, storage)
    }

    fn record(storage: &Storage, date: &str, kind: TransactionKind, amount: i64) {
        LedgerService::new(storage)
            .add(NewTransaction {
                date: date.into(),
                kind,
                category: "Umum".into(),
                amount: Money::from_rupiah(amount),
                note: String::new(),
            })
            .unwrap();
    }

    fn march() -> Month {
        Month::new(3).unwrap()
    }

    #[test]
    fn test_compute_surplus() {
        let (_temp, storage) = create_test_storage();
        record(&storage, "01-03-2025", TransactionKind::Income, 1_000_000);
        record(&storage, "02-03-2025", TransactionKind::Expense, 300_000);
        record(&storage, "03-03-2025", TransactionKind::Expense, 200_000);
        record(&storage, "03-04-2025", TransactionKind::Expense, 999_999);

        let analysis = AnalysisService::new(&storage).compute(march()).unwrap();
        assert_eq!(analysis.total_income, Money::from_rupiah(1_000_000));
        assert_eq!(analysis.total_expense, Money::from_rupiah(500_000));
        assert_eq!(analysis.balance, Money::from_rupiah(500_000));
        assert_eq!(analysis.expense_count, 2);
        assert_eq!(analysis.income_count, 1);
        assert!((analysis.average_expense - 250_000.0).abs() < f64::EPSILON);
        assert!((analysis.remaining_percent - 50.0).abs() < 1e-9);
        assert_eq!(analysis.condition, FinancialCondition::Surplus);
        assert_eq!(analysis.conclusion, Conclusion::Frugal);
    }

    #[test]
    fn test_compute_deficit() {
        let (_temp, storage) = create_test_storage();
        record(&storage, "01-03-2025", TransactionKind::Income, 1_000_000);
        record(&storage, "02-03-2025", TransactionKind::Expense, 600_000);
        record(&storage, "20-03-2025", TransactionKind::Expense, 500_000);

        let analysis = AnalysisService::new(&storage).compute(march()).unwrap();
        assert_eq!(analysis.total_expense, Money::from_rupiah(1_100_000));
        assert_eq!(analysis.balance, Money::from_rupiah(-100_000));
        assert!((analysis.remaining_percent + 10.0).abs() < 1e-9);
        assert_eq!(analysis.condition, FinancialCondition::Deficit);
        // -10% is still on the wasteful side of the boundary
        assert_eq!(analysis.conclusion, Conclusion::Wasteful);
    }

    #[test]
    fn test_compute_empty_month() {
        let (_temp, storage) = create_test_storage();
        let analysis = AnalysisService::new(&storage).compute(march()).unwrap();

        assert_eq!(analysis.condition, FinancialCondition::Balanced);
        assert_eq!(analysis.remaining_percent, 0.0);
        assert_eq!(analysis.conclusion, Conclusion::Wasteful);
    }

    #[test]
    fn test_snapshot_goes_stale_until_refreshed() {
        let (_temp, storage) = create_test_storage();
        let service = AnalysisService::new(&storage);

        assert!(service.load(march()).unwrap().is_none());
        assert_eq!(
            service.load_or_default(march()).unwrap(),
            MonthlyAnalysis::default()
        );

        record(&storage, "01-03-2025", TransactionKind::Income, 100);
        let refreshed = service.refresh(march()).unwrap();
        assert_eq!(service.load(march()).unwrap().unwrap(), refreshed);

        record(&storage, "02-03-2025", TransactionKind::Expense, 100);
        let stale = service.load(march()).unwrap().unwrap();
        assert_eq!(stale.total_expense, Money::zero());

        let fresh = service.refresh(march()).unwrap();
        assert_eq!(fresh.condition, FinancialCondition::Balanced);
    }

    #[test]
    fn test_determine_helpers() {
        let rp = Money::from_rupiah;
        assert_eq!(
            AnalysisService::determine_condition(rp(10), rp(20)),
            FinancialCondition::Deficit
        );
        assert_eq!(
            AnalysisService::determine_conclusion(-10.0),
            Conclusion::Wasteful
        );
        assert_eq!(
            AnalysisService::determine_conclusion(-10.01),
            Conclusion::Unhealthy
        );
        assert_eq!(AnalysisService::determine_conclusion(25.0), Conclusion::Balanced);
    }
}
