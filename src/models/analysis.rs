//! Monthly financial analysis snapshot
//!
//! Snapshots are computed from a month's transactions and persisted. A stored
//! snapshot is not invalidated when transactions change; it must be refreshed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Relationship between income and expense for a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FinancialCondition {
    /// Expense exceeded income (code 0)
    Deficit,
    /// Expense equals income (code 1)
    #[default]
    Balanced,
    /// Income exceeded expense (code 2)
    Surplus,
}

impl FinancialCondition {
    /// Classify a month by comparing totals
    pub fn determine(income: Money, expense: Money) -> Self {
        if expense > income {
            Self::Deficit
        } else if expense == income {
            Self::Balanced
        } else {
            Self::Surplus
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Deficit => 0,
            Self::Balanced => 1,
            Self::Surplus => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Deficit),
            1 => Some(Self::Balanced),
            2 => Some(Self::Surplus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Deficit => "DEFISIT",
            Self::Balanced => "SEIMBANG",
            Self::Surplus => "SURPLUS",
        }
    }
}

impl fmt::Display for FinancialCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Qualitative verdict from the share of income left over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    /// More than 25% left (code 0)
    Frugal,
    /// Between 0% (exclusive) and 25% left (code 1)
    #[default]
    Balanced,
    /// Overspent by at most 10% (code 2)
    Wasteful,
    /// Overspent by more than 10% (code 3)
    Unhealthy,
}

impl Conclusion {
    /// Classify by the remaining percentage of income
    pub fn determine(remaining_percent: f64) -> Self {
        if remaining_percent > 25.0 {
            Self::Frugal
        } else if remaining_percent > 0.0 {
            Self::Balanced
        } else if remaining_percent >= -10.0 {
            Self::Wasteful
        } else {
            Self::Unhealthy
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Frugal => 0,
            Self::Balanced => 1,
            Self::Wasteful => 2,
            Self::Unhealthy => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Frugal),
            1 => Some(Self::Balanced),
            2 => Some(Self::Wasteful),
            3 => Some(Self::Unhealthy),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Frugal => "HEMAT",
            Self::Balanced => "SEIMBANG",
            Self::Wasteful => "BOROS",
            Self::Unhealthy => "TIDAK SEHAT",
        }
    }

    /// Advice shown under the verdict
    pub fn description(&self) -> &'static str {
        match self {
            Self::Frugal => "Keuangan Anda sangat baik! Sisa > 25% dari pemasukan.",
            Self::Balanced => "Keuangan Anda cukup baik. Sisa 0-25% dari pemasukan.",
            Self::Wasteful => "Perlu lebih hemat! Pengeluaran melebihi pemasukan hingga 10%.",
            Self::Unhealthy => "Keuangan tidak sehat! Defisit lebih dari 10% pemasukan.",
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Financial summary of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MonthlyAnalysis {
    pub total_income: Money,
    pub total_expense: Money,
    /// Mean expense amount per expense transaction
    pub average_expense: f64,
    /// Balance as a percentage of income; 0 when there is no income
    pub remaining_percent: f64,
    /// Income minus expense
    pub balance: Money,
    pub condition: FinancialCondition,
    pub conclusion: Conclusion,
    pub expense_count: u32,
    pub income_count: u32,
}

impl MonthlyAnalysis {
    /// Build a snapshot from raw totals, deriving every other field
    pub fn from_totals(
        total_income: Money,
        total_expense: Money,
        income_count: u32,
        expense_count: u32,
    ) -> Self {
        let balance = total_income - total_expense;

        let average_expense = if expense_count > 0 {
            total_expense.rupiah() as f64 / f64::from(expense_count)
        } else {
            0.0
        };

        let remaining_percent = if total_income.is_positive() {
            balance.rupiah() as f64 / total_income.rupiah() as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_income,
            total_expense,
            average_expense,
            remaining_percent,
            balance,
            condition: FinancialCondition::determine(total_income, total_expense),
            conclusion: Conclusion::determine(remaining_percent),
            expense_count,
            income_count,
        }
    }

    pub fn transaction_count(&self) -> u32 {
        self.expense_count + self.income_count
    }

    /// Whether two snapshots were computed from the same totals
    ///
    /// Stored snapshots keep two decimals, so the float fields are ignored.
    pub fn same_totals(&self, other: &Self) -> bool {
        self.total_income == other.total_income
            && self.total_expense == other.total_expense
            && self.income_count == other.income_count
            && self.expense_count == other.expense_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition() {
        let r = Money::from_rupiah;
        assert_eq!(FinancialCondition::determine(r(100), r(200)), FinancialCondition::Deficit);
        assert_eq!(FinancialCondition::determine(r(100), r(100)), FinancialCondition::Balanced);
        assert_eq!(FinancialCondition::determine(r(200), r(100)), FinancialCondition::Surplus);
    }

    #[test]
    fn test_conclusion_boundaries() {
        assert_eq!(Conclusion::determine(25.01), Conclusion::Frugal);
        assert_eq!(Conclusion::determine(25.0), Conclusion::Balanced);
        assert_eq!(Conclusion::determine(0.01), Conclusion::Balanced);
        assert_eq!(Conclusion::determine(0.0), Conclusion::Wasteful);
        assert_eq!(Conclusion::determine(-10.0), Conclusion::Wasteful);
        assert_eq!(Conclusion::determine(-10.01), Conclusion::Unhealthy);
    }

    #[test]
    fn test_from_totals() {
        let analysis = MonthlyAnalysis::from_totals(
            Money::from_rupiah(2_000_000),
            Money::from_rupiah(1_500_000),
            1,
            3,
        );
        assert_eq!(analysis.balance, Money::from_rupiah(500_000));
        assert_eq!(analysis.average_expense, 500_000.0);
        assert_eq!(analysis.remaining_percent, 25.0);
        assert_eq!(analysis.condition, FinancialCondition::Surplus);
        assert_eq!(analysis.conclusion, Conclusion::Balanced);
        assert_eq!(analysis.transaction_count(), 4);
    }

    #[test]
    fn test_from_totals_without_income() {
        let analysis =
            MonthlyAnalysis::from_totals(Money::zero(), Money::from_rupiah(50_000), 0, 1);
        assert_eq!(analysis.remaining_percent, 0.0);
        assert_eq!(analysis.condition, FinancialCondition::Deficit);
        assert_eq!(analysis.conclusion, Conclusion::Wasteful);
    }

    #[test]
    fn test_default_snapshot() {
        let analysis = MonthlyAnalysis::default();
        assert_eq!(analysis.condition, FinancialCondition::Balanced);
        assert_eq!(analysis.conclusion, Conclusion::Balanced);
        assert_eq!(analysis.transaction_count(), 0);
    }

    #[test]
    fn test_same_totals_ignores_rounding() {
        let computed = MonthlyAnalysis::from_totals(Money::from_rupiah(100), Money::from_rupiah(10), 1, 3);
        let mut stored = computed.clone();
        stored.average_expense = 3.33;
        assert!(computed.same_totals(&stored));

        stored.expense_count = 2;
        assert!(!computed.same_totals(&stored));
    }
}
