//! Budget category ("pos anggaran") model
//!
//! A category carries a monthly budget plus fields derived from the month's
//! transactions. Derived fields are recomputed on every read by the budget
//! service; the stored values are only a cache.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LENGTH: usize = 20;

/// Whether spending stayed within budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    /// Remaining is zero or more (stored as 1)
    #[default]
    Safe,
    /// Spending exceeded the budget (stored as 0)
    Unsafe,
}

impl CategoryStatus {
    /// Status for a remaining amount
    pub fn from_remaining(remaining: Money) -> Self {
        if remaining.is_negative() {
            Self::Unsafe
        } else {
            Self::Safe
        }
    }

    /// Code stored in the category file
    pub fn code(&self) -> u8 {
        match self {
            Self::Safe => 1,
            Self::Unsafe => 0,
        }
    }

    pub fn from_code(code: i64) -> Self {
        if code == 1 {
            Self::Safe
        } else {
            Self::Unsafe
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe => "Aman",
            Self::Unsafe => "Tidak Aman",
        }
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A budget category for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Sequential number within the month
    pub number: u32,
    pub name: String,
    pub budget: Money,

    /// Sum of expense transactions in this category
    #[serde(default)]
    pub realized: Money,
    /// Budget minus realized; may be negative
    #[serde(default)]
    pub remaining: Money,
    /// Transactions of either kind that reference this category
    #[serde(default)]
    pub transaction_count: u32,
    #[serde(default)]
    pub status: CategoryStatus,
}

impl Category {
    /// Create a category with fresh derived fields
    pub fn new(name: impl Into<String>, budget: Money) -> Self {
        let mut category = Self {
            number: 0,
            name: name.into(),
            budget,
            realized: Money::zero(),
            remaining: Money::zero(),
            transaction_count: 0,
            status: CategoryStatus::Safe,
        };
        category.reset_derived();
        category
    }

    /// Reset the derived fields as if no transactions existed
    pub fn reset_derived(&mut self) {
        self.apply_activity(Money::zero(), 0);
    }

    /// Set realized spend and transaction count, updating remaining and status
    pub fn apply_activity(&mut self, realized: Money, transaction_count: u32) {
        self.realized = realized;
        self.remaining = self.budget - realized;
        self.transaction_count = transaction_count;
        self.status = CategoryStatus::from_remaining(self.remaining);
    }

    /// Whether the given name refers to this category
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }

    /// Share of the budget already spent, as a percentage
    pub fn usage_percent(&self) -> f64 {
        if self.budget.is_zero() {
            0.0
        } else {
            self.realized.rupiah() as f64 / self.budget.rupiah() as f64 * 100.0
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.number, self.name, self.budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_is_safe() {
        let cat = Category::new("Makan", Money::from_rupiah(500_000));
        assert_eq!(cat.remaining, Money::from_rupiah(500_000));
        assert_eq!(cat.realized, Money::zero());
        assert_eq!(cat.transaction_count, 0);
        assert_eq!(cat.status, CategoryStatus::Safe);
    }

    #[test]
    fn test_apply_activity_overspent() {
        let mut cat = Category::new("Makan", Money::from_rupiah(100_000));
        cat.apply_activity(Money::from_rupiah(150_000), 4);
        assert_eq!(cat.remaining, Money::from_rupiah(-50_000));
        assert_eq!(cat.status, CategoryStatus::Unsafe);
        assert_eq!(cat.transaction_count, 4);
    }

    #[test]
    fn test_exactly_spent_is_safe() {
        let mut cat = Category::new("Makan", Money::from_rupiah(100_000));
        cat.apply_activity(Money::from_rupiah(100_000), 1);
        assert!(cat.remaining.is_zero());
        assert_eq!(cat.status, CategoryStatus::Safe);
        assert_eq!(cat.usage_percent(), 100.0);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CategoryStatus::Safe.code(), 1);
        assert_eq!(CategoryStatus::from_code(0), CategoryStatus::Unsafe);
        assert_eq!(CategoryStatus::from_code(7), CategoryStatus::Unsafe);
    }
}
