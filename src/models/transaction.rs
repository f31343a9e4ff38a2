//! Transaction model
//!
//! A single income or expense entry. Transactions reference a budget
//! category by name only; there is no foreign key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;
use super::period::Month;

/// Date format used in record files and user input
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent (code 0)
    #[default]
    Expense,
    /// Money received (code 1)
    Income,
}

impl TransactionKind {
    /// Indonesian label stored in the transaction file
    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Pengeluaran",
            Self::Income => "Pemasukan",
        }
    }

    /// Numeric code used by menus (0 expense, 1 income)
    pub fn code(&self) -> u8 {
        match self {
            Self::Expense => 0,
            Self::Income => 1,
        }
    }

    /// Kind for a numeric code, if valid
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Expense),
            1 => Some(Self::Income),
            _ => None,
        }
    }

    /// Parse a stored or typed label (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("pengeluaran") || label.eq_ignore_ascii_case("expense") {
            Some(Self::Expense)
        } else if label.eq_ignore_ascii_case("pemasukan") || label.eq_ignore_ascii_case("income")
        {
            Some(Self::Income)
        } else {
            None
        }
    }

    /// The other kind
    pub fn toggle(&self) -> Self {
        match self {
            Self::Expense => Self::Income,
            Self::Income => Self::Expense,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| format!("Jenis transaksi tidak valid: {}", s))
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    /// Budget category name; matched case-insensitively
    pub category: String,
    pub amount: Money,
    #[serde(default)]
    pub note: String,
}

impl Transaction {
    /// The month this transaction counts toward
    pub fn month(&self) -> Month {
        Month::of(self.date)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Whether this transaction belongs to the named category
    pub fn matches_category(&self, name: &str) -> bool {
        self.category.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Date rendered as `dd-mm-yyyy`
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id,
            self.date_string(),
            self.kind,
            self.category,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: TransactionId::new(3),
            date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            kind: TransactionKind::Expense,
            category: "Makan".into(),
            amount: Money::from_rupiah(25_000),
            note: "Nasi goreng".into(),
        }
    }

    #[test]
    fn test_kind_labels_and_codes() {
        assert_eq!(TransactionKind::Expense.label(), "Pengeluaran");
        assert_eq!(TransactionKind::Income.label(), "Pemasukan");
        assert_eq!(TransactionKind::from_code(1), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::from_code(2), None);
        assert_eq!(
            TransactionKind::from_label("PEMASUKAN"),
            Some(TransactionKind::Income)
        );
        assert_eq!(TransactionKind::from_label("gaji"), None);
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let txn = sample();
        assert!(txn.matches_category("makan"));
        assert!(txn.matches_category(" MAKAN "));
        assert!(!txn.matches_category("Transport"));
    }

    #[test]
    fn test_month_and_date_string() {
        let txn = sample();
        assert_eq!(txn.month().number(), 3);
        assert_eq!(txn.date_string(), "15-03-2025");
        assert!(txn.is_expense());
    }
}
