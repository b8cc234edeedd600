//! Category service
//!
//! Business logic for budget categories: creation with duplicate checks,
//! lookup by name or id, and deletion along with the category's budget rows.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{BudgetCategory, CategoryId, MacroGroup};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category
    ///
    /// `macro_group` of `None` makes the category eligible for every group.
    pub fn create(
        &self,
        name: &str,
        macro_group: Option<MacroGroup>,
        default_percentage: Option<f64>,
    ) -> FamfinResult<BudgetCategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FamfinError::Validation("Category name cannot be empty".into()));
        }

        if self.storage.categories.get_by_name(name)?.is_some() {
            return Err(FamfinError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let mut category = BudgetCategory::new(name, macro_group);
        category.default_percentage = default_percentage;
        category
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        info!(category = %category.name, group = ?category.macro_group, "created category");
        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> FamfinResult<Option<BudgetCategory>> {
        self.storage.categories.get(id)
    }

    /// Find a category by name, falling back to parsing an id
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<BudgetCategory>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    pub fn list(&self) -> FamfinResult<Vec<BudgetCategory>> {
        self.storage.categories.get_all()
    }

    /// Categories eligible for a group, untagged ones included
    pub fn list_for_group(&self, group: MacroGroup) -> FamfinResult<Vec<BudgetCategory>> {
        self.storage.categories.get_for_group(group)
    }

    /// Delete a category and every budget row that references it
    pub fn delete(&self, id: CategoryId) -> FamfinResult<BudgetCategory> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| FamfinError::category_not_found(id.to_string()))?;

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        let removed = self.storage.budgets.delete_for_category(id)?;
        if removed > 0 {
            self.storage.budgets.save()?;
        }

        self.storage.log_delete(
            EntityType::Category,
            category.id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        info!(category = %category.name, budgets_removed = removed, "deleted category");
        Ok(category)
    }
}
