//! Storage initialization
//!
//! First-run setup: starter categories for each macro group and the shared
//! cost-center bucket.

use crate::config::FamfinPaths;
use crate::error::FamfinError;
use crate::models::{BudgetCategory, CostCenter, MacroGroup};

use super::categories::CategoryData;
use super::cost_centers::CostCenterData;
use super::file_io::write_json_atomic;

/// Name of the seeded organization-wide cost center
pub const SHARED_BUCKET_NAME: &str = "Shared";

/// Initialize storage for a fresh installation
///
/// Existing category and cost-center files are left untouched.
pub fn initialize_storage(paths: &FamfinPaths) -> Result<(), FamfinError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        write_json_atomic(
            paths.categories_file(),
            &CategoryData {
                categories: default_categories(),
            },
        )?;
    }

    if !paths.cost_centers_file().exists() {
        write_json_atomic(
            paths.cost_centers_file(),
            &CostCenterData {
                cost_centers: vec![CostCenter::shared_bucket(SHARED_BUCKET_NAME)],
            },
        )?;
    }

    Ok(())
}

/// Starter categories, evenly weighted inside their group
pub fn default_categories() -> Vec<BudgetCategory> {
    let seeds: [(MacroGroup, &[&str]); 3] = [
        (
            MacroGroup::Needs,
            &["Housing", "Groceries", "Transportation", "Health"],
        ),
        (MacroGroup::Wants, &["Dining Out", "Entertainment", "Shopping"]),
        (MacroGroup::Investments, &["Emergency Fund", "Retirement"]),
    ];

    seeds
        .iter()
        .flat_map(|(group, names)| {
            names
                .iter()
                .map(move |name| BudgetCategory::new(*name, Some(*group)))
        })
        .collect()
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FamfinPaths) -> bool {
    !paths.categories_file().exists()
}
