//! Category service
//!
//! Business logic for a month's budget categories ("pos anggaran"): CRUD with
//! validation, usage checks before deletion, and preparing a new month.

use crate::audit::{summarize_changes, EntityType};
use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Money, Month};
use crate::services::validation;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Default number of categories allowed per month
pub const DEFAULT_MAX_CATEGORIES: usize = 50;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
    max_categories: usize,
}

/// Fields to change on an existing category; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub budget: Option<Money>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.budget.is_none()
    }
}

/// How a month's category file came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthPreparation {
    /// The month already had a category file
    Existing,
    /// Categories were copied from the previous month
    Copied { from: Month, count: usize },
    /// An empty category file was created
    Empty,
}

fn audit_id(month: Month, number: u32) -> String {
    format!("{}/{}", month.code(), number)
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            max_categories: DEFAULT_MAX_CATEGORIES,
        }
    }

    /// Override the per-month category limit
    pub fn with_limit(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories;
        self
    }

    fn ensure_unique(&self, month: Month, name: &str, except: Option<u32>) -> KantongResult<()> {
        if let Some(existing) = self.storage.categories.find_by_name(month, name)? {
            if Some(existing.number) != except {
                return Err(KantongError::Duplicate {
                    entity_type: "Nama pos",
                    identifier: existing.name,
                });
            }
        }
        Ok(())
    }

    /// Add a category to the month
    pub fn add(&self, month: Month, name: &str, budget: Money) -> KantongResult<Category> {
        let name = validation::category_name(name)?;
        self.ensure_unique(month, &name, None)?;
        validation::category_budget(budget)?;

        if self.storage.categories.load(month)?.len() >= self.max_categories {
            return Err(KantongError::CapacityExceeded {
                entity_type: "pos anggaran",
                limit: self.max_categories,
            });
        }

        let added = self
            .storage
            .categories
            .add(month, Category::new(name, budget))?;

        // Transactions may already reference the name
        let category = BudgetService::new(self.storage).recalculate(month, added.number)?;

        self.storage.log_create(
            EntityType::Category,
            audit_id(month, category.number),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Change a category's name and/or budget
    ///
    /// Transactions keep the name they were recorded with, so renaming a
    /// category detaches transactions filed under the old name.
    pub fn edit(&self, month: Month, number: u32, patch: CategoryPatch) -> KantongResult<Category> {
        let before = self.get(month, number)?;
        if patch.is_empty() {
            return Ok(before);
        }

        let mut category = before.clone();

        if let Some(name) = patch.name.as_deref() {
            let name = validation::category_name(name)?;
            self.ensure_unique(month, &name, Some(number))?;
            category.name = name;
        }

        if let Some(budget) = patch.budget {
            validation::category_budget(budget)?;
            category.budget = budget;
        }

        self.storage.categories.update(month, number, category)?;
        let after = BudgetService::new(self.storage).recalculate(month, number)?;

        self.storage.log_update(
            EntityType::Category,
            audit_id(month, number),
            Some(after.name.clone()),
            &before,
            &after,
            summarize_changes(&before, &after),
        )?;

        Ok(after)
    }

    /// Delete a category that no transaction references
    pub fn delete(&self, month: Month, number: u32) -> KantongResult<Category> {
        let category = BudgetService::new(self.storage).recalculate(month, number)?;
        if category.transaction_count > 0 {
            return Err(KantongError::InUse {
                name: category.name,
                count: category.transaction_count,
            });
        }

        let removed = self.storage.categories.delete(month, number)?;

        self.storage.log_delete(
            EntityType::Category,
            audit_id(month, number),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// List the month's categories with fresh derived fields
    pub fn list(&self, month: Month) -> KantongResult<Vec<Category>> {
        BudgetService::new(self.storage).recalculate_month(month)
    }

    /// Get a category by number
    pub fn get(&self, month: Month, number: u32) -> KantongResult<Category> {
        self.storage
            .categories
            .find_by_number(month, number)?
            .ok_or_else(|| KantongError::category_not_found(number.to_string()))
    }

    /// Find a category by name or number
    pub fn find(&self, month: Month, identifier: &str) -> KantongResult<Option<Category>> {
        if let Some(category) = self.storage.categories.find_by_name(month, identifier)? {
            return Ok(Some(category));
        }

        if let Ok(number) = identifier.trim().parse::<u32>() {
            return self.storage.categories.find_by_number(month, number);
        }

        Ok(None)
    }

    /// Category names in file order
    pub fn names(&self, month: Month) -> KantongResult<Vec<String>> {
        Ok(self
            .storage
            .categories
            .load(month)?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Whether the month has a category with this name
    pub fn exists(&self, month: Month, name: &str) -> KantongResult<bool> {
        Ok(self.storage.categories.find_by_name(month, name)?.is_some())
    }

    /// Recalculate the month and record the refresh
    pub fn refresh(&self, month: Month) -> KantongResult<Vec<Category>> {
        let categories = self.list(month)?;
        self.storage
            .log_refresh(EntityType::Category, month.code(), &categories)?;
        Ok(categories)
    }

    /// Copy categories from another month, replacing the destination's
    pub fn copy_from(&self, dest: Month, src: Month) -> KantongResult<usize> {
        let count = self.storage.categories.copy_from(dest, src)?;
        let categories = self.list(dest)?;
        self.storage
            .log_refresh(EntityType::Category, dest.code(), &categories)?;
        Ok(count)
    }

    /// Make sure the month has a category file
    ///
    /// With `copy_previous` set and a non-empty previous month (December for
    /// January), that month's categories are copied over with their derived
    /// fields reset. Otherwise an empty file is created.
    pub fn prepare_month(&self, month: Month, copy_previous: bool) -> KantongResult<MonthPreparation> {
        if self.storage.categories.exists(month) {
            return Ok(MonthPreparation::Existing);
        }

        let previous = month.prev();
        if copy_previous && !self.storage.categories.load(previous)?.is_empty() {
            let count = self.copy_from(month, previous)?;
            return Ok(MonthPreparation::Copied {
                from: previous,
                count,
            });
        }

        self.storage.categories.init_month(month)?;
        Ok(MonthPreparation::Empty)
    }
}
