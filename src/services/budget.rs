//! Budget service
//!
//! Keeps each category's realized spend, remaining budget, transaction count
//! and status in step with the month's transactions.

use serde::Serialize;

use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Money, Month, Transaction};
use crate::storage::Storage;

/// Service for budget recalculation
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// Totals across all categories of a month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: u8,
    pub total_budget: Money,
    pub total_realized: Money,
    pub total_remaining: Money,
    pub category_count: usize,
    pub unsafe_count: usize,
}

fn realized_in(transactions: &[Transaction], name: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense() && t.matches_category(name))
        .map(|t| t.amount)
        .sum()
}

fn count_in(transactions: &[Transaction], name: &str) -> u32 {
    let count = transactions
        .iter()
        .filter(|t| t.matches_category(name))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

fn apply(category: &mut Category, transactions: &[Transaction]) {
    let realized = realized_in(transactions, &category.name);
    let count = count_in(transactions, &category.name);
    category.apply_activity(realized, count);
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Sum of expense transactions in the month recorded against a category
    pub fn realized_spend(&self, name: &str, month: Month) -> KantongResult<Money> {
        let transactions = self.storage.transactions.load_month(month)?;
        Ok(realized_in(&transactions, name))
    }

    /// Recompute one category's derived fields and persist them
    pub fn recalculate(&self, month: Month, number: u32) -> KantongResult<Category> {
        let mut category = self
            .storage
            .categories
            .find_by_number(month, number)?
            .ok_or_else(|| KantongError::category_not_found(number.to_string()))?;

        let transactions = self.storage.transactions.load_month(month)?;
        apply(&mut category, &transactions);
        self.storage
            .categories
            .update(month, number, category.clone())?;

        Ok(category)
    }

    /// Recompute every category of the month and persist the result
    ///
    /// A month without a category file is left untouched.
    pub fn recalculate_month(&self, month: Month) -> KantongResult<Vec<Category>> {
        if !self.storage.categories.exists(month) {
            return Ok(Vec::new());
        }

        let mut categories = self.storage.categories.load(month)?;
        if categories.is_empty() {
            return Ok(categories);
        }

        let transactions = self.storage.transactions.load_month(month)?;
        for category in &mut categories {
            apply(category, &transactions);
        }
        self.storage.categories.save(month, &categories)?;

        Ok(categories)
    }

    /// Budget totals for a month, recalculated first
    pub fn month_summary(&self, month: Month) -> KantongResult<MonthSummary> {
        let categories = self.recalculate_month(month)?;

        Ok(MonthSummary {
            month: month.number(),
            total_budget: categories.iter().map(|c| c.budget).sum(),
            total_realized: categories.iter().map(|c| c.realized).sum(),
            total_remaining: categories.iter().map(|c| c.remaining).sum(),
            category_count: categories.len(),
            unsafe_count: categories
                .iter()
                .filter(|c| c.remaining.is_negative())
                .count(),
        })
    }
}
