//! Monthly budget repository
//!
//! Manages loading and saving confirmed category limits to budgets.json.
//! There is at most one row per (category, month).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamfinError;
use crate::models::{Budget, CategoryId, MonthYear};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Composite key for budget rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub category_id: CategoryId,
    pub month_year: MonthYear,
}

impl BudgetKey {
    pub fn new(category_id: CategoryId, month_year: MonthYear) -> Self {
        Self {
            category_id,
            month_year,
        }
    }
}

impl From<&Budget> for BudgetKey {
    fn from(budget: &Budget) -> Self {
        Self::new(budget.category_id, budget.month_year)
    }
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, Budget>>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FamfinError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self.budgets.write().map_err(lock_error)?;
        budgets.clear();
        for budget in file_data.budgets {
            budgets.insert(BudgetKey::from(&budget), budget);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FamfinError> {
        let file_data = BudgetData {
            budgets: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(
        &self,
        category_id: CategoryId,
        month_year: MonthYear,
    ) -> Result<Option<Budget>, FamfinError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.get(&BudgetKey::new(category_id, month_year)).cloned())
    }

    /// All rows ordered by month, then category id
    pub fn get_all(&self) -> Result<Vec<Budget>, FamfinError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        let mut list: Vec<_> = budgets.values().cloned().collect();
        list.sort_by_key(|b| (b.month_year, b.category_id));
        Ok(list)
    }

    pub fn get_for_month(&self, month_year: MonthYear) -> Result<Vec<Budget>, FamfinError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|b| b.month_year == month_year)
            .collect())
    }

    /// Insert or replace the row for the budget's (category, month)
    ///
    /// Returns the row it replaced, if any.
    pub fn upsert(&self, budget: Budget) -> Result<Option<Budget>, FamfinError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        Ok(budgets.insert(BudgetKey::from(&budget), budget))
    }

    /// Remove every row for a category (used when the category is deleted)
    pub fn delete_for_category(&self, category_id: CategoryId) -> Result<usize, FamfinError> {
        let mut budgets = self.budgets.write().map_err(lock_error)?;
        let before = budgets.len();
        budgets.retain(|key, _| key.category_id != category_id);
        Ok(before - budgets.len())
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        let budgets = self.budgets.read().map_err(lock_error)?;
        Ok(budgets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        (temp_dir, repo)
    }

    fn jan() -> MonthYear {
        MonthYear::new(2025, 1).unwrap()
    }

    #[test]
    fn test_upsert_replaces_same_key() {
        let (_temp_dir, repo) = create_test_repo();
        let category_id = CategoryId::new();

        let first = repo
            .upsert(Budget::new(category_id, jan(), Money::from_cents(10_000)))
            .unwrap();
        assert!(first.is_none());

        let replaced = repo
            .upsert(Budget::new(category_id, jan(), Money::from_cents(15_000)))
            .unwrap();
        assert_eq!(replaced.unwrap().limit_amount.cents(), 10_000);
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(
            repo.get(category_id, jan()).unwrap().unwrap().limit_amount.cents(),
            15_000
        );
    }

    #[test]
    fn test_get_for_month_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let category_id = CategoryId::new();
        repo.upsert(Budget::new(category_id, jan(), Money::from_cents(100)))
            .unwrap();
        repo.upsert(Budget::new(category_id, jan().next(), Money::from_cents(200)))
            .unwrap();
        repo.save().unwrap();

        let reloaded = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        reloaded.load().unwrap();
        let january = reloaded.get_for_month(jan()).unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].limit_amount.cents(), 100);
    }

    #[test]
    fn test_delete_for_category() {
        let (_temp_dir, repo) = create_test_repo();
        let keep = CategoryId::new();
        let drop = CategoryId::new();
        repo.upsert(Budget::new(keep, jan(), Money::from_cents(1))).unwrap();
        repo.upsert(Budget::new(drop, jan(), Money::from_cents(2))).unwrap();
        repo.upsert(Budget::new(drop, jan().next(), Money::from_cents(3)))
            .unwrap();

        assert_eq!(repo.delete_for_category(drop).unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 1);
    }
}
