//! Cost center repository
//!
//! Manages loading and saving cost centers to cost_centers.json. Unlike the
//! other repositories this one keeps insertion order, since responsible
//! reports list parties in the order they were added.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamfinError;
use crate::models::{CostCenter, CostCenterId};

use super::file_io::{lock_error, read_json, write_json_atomic};

/// Serializable cost center file layout
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CostCenterData {
    pub cost_centers: Vec<CostCenter>,
}

/// Repository for cost center persistence
pub struct CostCenterRepository {
    path: PathBuf,
    cost_centers: RwLock<Vec<CostCenter>>,
}

impl CostCenterRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cost_centers: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), FamfinError> {
        let file_data: CostCenterData = read_json(&self.path)?;
        let mut cost_centers = self.cost_centers.write().map_err(lock_error)?;
        *cost_centers = file_data.cost_centers;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FamfinError> {
        let file_data = CostCenterData {
            cost_centers: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CostCenterId) -> Result<Option<CostCenter>, FamfinError> {
        let cost_centers = self.cost_centers.read().map_err(lock_error)?;
        Ok(cost_centers.iter().find(|c| c.id == id).cloned())
    }

    /// All cost centers in insertion order, inactive ones included
    pub fn get_all(&self) -> Result<Vec<CostCenter>, FamfinError> {
        let cost_centers = self.cost_centers.read().map_err(lock_error)?;
        Ok(cost_centers.clone())
    }

    pub fn get_active(&self) -> Result<Vec<CostCenter>, FamfinError> {
        Ok(self.get_all()?.into_iter().filter(|c| c.is_active).collect())
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<CostCenter>, FamfinError> {
        let cost_centers = self.cost_centers.read().map_err(lock_error)?;
        let name = name.trim();
        Ok(cost_centers
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// The shared bucket, if one exists
    pub fn get_shared_bucket(&self) -> Result<Option<CostCenter>, FamfinError> {
        let cost_centers = self.cost_centers.read().map_err(lock_error)?;
        Ok(cost_centers.iter().find(|c| c.is_shared_bucket).cloned())
    }

    /// Insert at the end, or replace in place when the id exists
    pub fn upsert(&self, cost_center: CostCenter) -> Result<(), FamfinError> {
        let mut cost_centers = self.cost_centers.write().map_err(lock_error)?;
        match cost_centers.iter_mut().find(|c| c.id == cost_center.id) {
            Some(existing) => *existing = cost_center,
            None => cost_centers.push(cost_center),
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        let cost_centers = self.cost_centers.read().map_err(lock_error)?;
        Ok(cost_centers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CostCenterRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CostCenterRepository::new(temp_dir.path().join("cost_centers.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_insertion_order_survives_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.upsert(CostCenter::with_default_split("Zoe", 40.0)).unwrap();
        repo.upsert(CostCenter::with_default_split("Adam", 60.0)).unwrap();
        repo.upsert(CostCenter::shared_bucket("Shared")).unwrap();
        repo.save().unwrap();

        let reloaded = CostCenterRepository::new(temp_dir.path().join("cost_centers.json"));
        reloaded.load().unwrap();
        let names: Vec<_> = reloaded.get_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Zoe", "Adam", "Shared"]);
        assert_eq!(reloaded.get_shared_bucket().unwrap().unwrap().name, "Shared");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let (_temp_dir, repo) = create_test_repo();
        let mut alice = CostCenter::new("Alice");
        repo.upsert(alice.clone()).unwrap();
        repo.upsert(CostCenter::new("Bob")).unwrap();

        alice.deactivate();
        repo.upsert(alice.clone()).unwrap();

        assert_eq!(repo.count().unwrap(), 2);
        assert!(!repo.get(alice.id).unwrap().unwrap().is_active);
        assert_eq!(repo.get_active().unwrap().len(), 1);
        assert_eq!(repo.get_all().unwrap()[0].name, "Alice");
    }

    #[test]
    fn test_get_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(CostCenter::new("Alice")).unwrap();
        assert!(repo.get_by_name("ALICE").unwrap().is_some());
        assert!(repo.get_by_name("Carol").unwrap().is_none());
    }
}
