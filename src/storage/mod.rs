//! Storage layer for famfin
//!
//! JSON file storage with atomic writes. Each repository owns one file under
//! `data/` and keeps its records in memory behind an `RwLock`; callers load
//! once, mutate, then save the repositories they touched.

pub mod budget;
pub mod categories;
pub mod cost_centers;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use budget::{BudgetKey, BudgetRepository};
pub use categories::CategoryRepository;
pub use cost_centers::CostCenterRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, SHARED_BUCKET_NAME};
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::FamfinPaths;
use crate::error::FamfinError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: FamfinPaths,
    audit: AuditLogger,
    pub categories: CategoryRepository,
    pub cost_centers: CostCenterRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a storage rooted at `paths`, creating directories as needed
    pub fn new(paths: FamfinPaths) -> Result<Self, FamfinError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            categories: CategoryRepository::new(paths.categories_file()),
            cost_centers: CostCenterRepository::new(paths.cost_centers_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &FamfinPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FamfinError> {
        self.categories.load()?;
        self.cost_centers.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FamfinError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), FamfinError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), FamfinError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::CostCenter;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_load_after_initialize() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert_eq!(storage.categories.count().unwrap(), 9);
        assert!(storage.cost_centers.get_shared_bucket().unwrap().is_some());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_audit_helpers_write_log() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        let cc = CostCenter::new("Alice");

        storage
            .log_create(EntityType::CostCenter, cc.id.to_string(), Some(cc.name.clone()), &cc)
            .unwrap();
        storage
            .log_delete(EntityType::CostCenter, cc.id.to_string(), None, &cc)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Delete);
    }
}
