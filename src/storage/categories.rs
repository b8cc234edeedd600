//! Budget category repository
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamfinError;
use crate::models::{BudgetCategory, CategoryId, MacroGroup};

use super::file_io::{lock_error, read_json, write_json_atomic};

/// Serializable category file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<BudgetCategory>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, BudgetCategory>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), FamfinError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk, ordered by group then name
    pub fn save(&self) -> Result<(), FamfinError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<BudgetCategory>, FamfinError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.get(&id).cloned())
    }

    /// All categories, ordered by group (untagged last) then name
    pub fn get_all(&self) -> Result<Vec<BudgetCategory>, FamfinError> {
        let categories = self.categories.read().map_err(lock_error)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        list.sort_by(|a, b| {
            group_rank(a.macro_group)
                .cmp(&group_rank(b.macro_group))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(list)
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<BudgetCategory>, FamfinError> {
        let categories = self.categories.read().map_err(lock_error)?;
        let name = name.trim();
        Ok(categories
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Categories eligible for a macro group (untagged ones included)
    pub fn get_for_group(&self, group: MacroGroup) -> Result<Vec<BudgetCategory>, FamfinError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.matches_group(group))
            .collect())
    }

    pub fn upsert(&self, category: BudgetCategory) -> Result<(), FamfinError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.insert(category.id, category);
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, FamfinError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        Ok(categories.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.len())
    }
}

fn group_rank(group: Option<MacroGroup>) -> usize {
    match group {
        Some(MacroGroup::Needs) => 0,
        Some(MacroGroup::Wants) => 1,
        Some(MacroGroup::Investments) => 2,
        None => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();
        let rent = BudgetCategory::with_weight("Rent", MacroGroup::Needs, 60.0);
        let id = rent.id;

        repo.upsert(rent).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(_temp_dir.path().join("categories.json"));
        reloaded.load().unwrap();
        let loaded = reloaded.get(id).unwrap().unwrap();
        assert_eq!(loaded.name, "Rent");
        assert_eq!(loaded.default_percentage, Some(60.0));
    }

    #[test]
    fn test_ordering_and_group_filter() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(BudgetCategory::new("Misc", None)).unwrap();
        repo.upsert(BudgetCategory::new("Travel", Some(MacroGroup::Wants)))
            .unwrap();
        repo.upsert(BudgetCategory::new("Rent", Some(MacroGroup::Needs)))
            .unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Rent", "Travel", "Misc"]);

        let wants: Vec<_> = repo
            .get_for_group(MacroGroup::Wants)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(wants, vec!["Travel", "Misc"]);
    }

    #[test]
    fn test_get_by_name_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let category = BudgetCategory::new("Groceries", Some(MacroGroup::Needs));
        let id = category.id;
        repo.upsert(category).unwrap();

        assert!(repo.get_by_name(" groceries ").unwrap().is_some());
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get_by_name("Groceries").unwrap().is_none());
    }
}
