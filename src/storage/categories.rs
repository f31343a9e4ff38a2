//! Budget category store backed by one `pos_MM.txt` file per month

use crate::config::paths::KantongPaths;
use crate::error::{KantongError, KantongResult};
use crate::models::{Category, Month};

use super::codec::{decode_all, encode_all, ParseMode};
use super::file_io::{read_lines, write_lines_atomic};

/// Repository for per-month budget categories
pub struct CategoryStore {
    paths: KantongPaths,
    mode: ParseMode,
}

impl CategoryStore {
    /// Create a new category store
    pub fn new(paths: KantongPaths, mode: ParseMode) -> Self {
        Self { paths, mode }
    }

    /// Whether a category file exists for the month
    pub fn exists(&self, month: Month) -> bool {
        self.paths.categories_file(month).exists()
    }

    /// Create an empty category file for the month if none exists
    pub fn init_month(&self, month: Month) -> KantongResult<()> {
        if self.exists(month) {
            return Ok(());
        }
        write_lines_atomic::<_, &str>(self.paths.categories_file(month), &[])
    }

    /// Load the month's categories in file order
    pub fn load(&self, month: Month) -> KantongResult<Vec<Category>> {
        decode_all(&read_lines(self.paths.categories_file(month))?, self.mode)
    }

    /// Replace the month's categories
    pub fn save(&self, month: Month, categories: &[Category]) -> KantongResult<()> {
        write_lines_atomic(self.paths.categories_file(month), &encode_all(categories))
    }

    /// Find a category by name (case-insensitive)
    pub fn find_by_name(&self, month: Month, name: &str) -> KantongResult<Option<Category>> {
        Ok(self.load(month)?.into_iter().find(|c| c.matches_name(name)))
    }

    /// Find a category by its number
    pub fn find_by_number(&self, month: Month, number: u32) -> KantongResult<Option<Category>> {
        Ok(self.load(month)?.into_iter().find(|c| c.number == number))
    }

    /// Append a category, assigning the next number and fresh derived fields
    pub fn add(&self, month: Month, mut category: Category) -> KantongResult<Category> {
        let mut all = self.load(month)?;
        category.number = all.iter().map(|c| c.number).max().unwrap_or(0) + 1;
        category.reset_derived();
        all.push(category.clone());
        self.save(month, &all)?;
        Ok(category)
    }

    /// Replace the category with the given number; the number is kept
    pub fn update(&self, month: Month, number: u32, mut category: Category) -> KantongResult<()> {
        let mut all = self.load(month)?;
        let slot = all
            .iter_mut()
            .find(|c| c.number == number)
            .ok_or_else(|| KantongError::category_not_found(number.to_string()))?;
        category.number = number;
        *slot = category;
        self.save(month, &all)
    }

    /// Remove a category, returning it
    pub fn delete(&self, month: Month, number: u32) -> KantongResult<Category> {
        let mut all = self.load(month)?;
        let index = all
            .iter()
            .position(|c| c.number == number)
            .ok_or_else(|| KantongError::category_not_found(number.to_string()))?;
        let removed = all.remove(index);
        self.save(month, &all)?;
        Ok(removed)
    }

    /// Copy another month's categories into `dest`, resetting derived fields
    ///
    /// Replaces whatever `dest` held. Returns the number of categories copied.
    pub fn copy_from(&self, dest: Month, src: Month) -> KantongResult<usize> {
        if dest == src {
            return Err(KantongError::Validation(
                "Bulan sumber dan tujuan tidak boleh sama".into(),
            ));
        }

        let mut categories = self.load(src)?;
        if categories.is_empty() {
            return Err(KantongError::Validation(format!(
                "Tidak ada pos anggaran di bulan {}",
                src
            )));
        }

        for category in &mut categories {
            category.reset_derived();
        }
        self.save(dest, &categories)?;
        Ok(categories.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryStatus, Money};
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, CategoryStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = KantongPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, CategoryStore::new(paths, ParseMode::Lenient))
    }

    fn month(n: u8) -> Month {
        Month::new(n).unwrap()
    }

    #[test]
    fn test_init_month_creates_empty_file() {
        let (_temp, store) = create_test_store();
        assert!(!store.exists(month(2)));

        store.init_month(month(2)).unwrap();
        assert!(store.exists(month(2)));
        assert!(store.load(month(2)).unwrap().is_empty());
    }

    #[test]
    fn test_add_assigns_sequential_numbers() {
        let (_temp, store) = create_test_store();
        let a = store
            .add(month(3), Category::new("Makan", Money::from_rupiah(100)))
            .unwrap();
        let b = store
            .add(month(3), Category::new("Kos", Money::from_rupiah(500)))
            .unwrap();

        assert_eq!(a.number, 1);
        assert_eq!(b.number, 2);

        store.delete(month(3), 1).unwrap();
        let c = store
            .add(month(3), Category::new("Pulsa", Money::from_rupiah(50)))
            .unwrap();
        assert_eq!(c.number, 3);
    }

    #[test]
    fn test_find_by_name_is_case_insensitive() {
        let (_temp, store) = create_test_store();
        store
            .add(month(3), Category::new("Makan", Money::from_rupiah(100)))
            .unwrap();

        assert!(store.find_by_name(month(3), "MAKAN").unwrap().is_some());
        assert!(store.find_by_name(month(4), "Makan").unwrap().is_none());
    }

    #[test]
    fn test_update_keeps_number() {
        let (_temp, store) = create_test_store();
        let mut cat = store
            .add(month(3), Category::new("Makan", Money::from_rupiah(100)))
            .unwrap();
        cat.name = "Jajan".into();
        cat.number = 99;
        store.update(month(3), 1, cat).unwrap();

        let loaded = store.find_by_number(month(3), 1).unwrap().unwrap();
        assert_eq!(loaded.name, "Jajan");
    }

    #[test]
    fn test_delete_missing() {
        let (_temp, store) = create_test_store();
        assert!(store.delete(month(3), 7).unwrap_err().is_not_found());
    }

    #[test]
    fn test_copy_from_resets_derived_fields() {
        let (_temp, store) = create_test_store();
        let mut spent = Category::new("Makan", Money::from_rupiah(100));
        spent.number = 1;
        spent.apply_activity(Money::from_rupiah(150), 3);
        store.save(month(1), &[spent]).unwrap();

        let copied = store.copy_from(month(2), month(1)).unwrap();
        assert_eq!(copied, 1);

        let cats = store.load(month(2)).unwrap();
        assert_eq!(cats[0].realized, Money::zero());
        assert_eq!(cats[0].remaining, Money::from_rupiah(100));
        assert_eq!(cats[0].transaction_count, 0);
        assert_eq!(cats[0].status, CategoryStatus::Safe);
    }

    #[test]
    fn test_copy_from_rejects_same_or_empty_month() {
        let (_temp, store) = create_test_store();
        assert!(store.copy_from(month(2), month(2)).is_err());
        assert!(store.copy_from(month(2), month(1)).is_err());
    }
}
