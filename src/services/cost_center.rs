//! Cost center service
//!
//! Business logic for responsible parties: creation, default split
//! maintenance and deactivation. Cost centers are never deleted, since past
//! transactions keep pointing at them.

use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{CostCenter, CostCenterId};
use crate::storage::Storage;

/// Service for cost center management
pub struct CostCenterService<'a> {
    storage: &'a Storage,
}

impl<'a> CostCenterService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a cost center
    ///
    /// Only one shared bucket may exist.
    pub fn create(
        &self,
        name: &str,
        default_split_percentage: Option<f64>,
        shared_bucket: bool,
    ) -> FamfinResult<CostCenter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FamfinError::Validation(
                "Cost center name cannot be empty".into(),
            ));
        }

        if self.storage.cost_centers.get_by_name(name)?.is_some() {
            return Err(FamfinError::Duplicate {
                entity_type: "Cost center",
                identifier: name.to_string(),
            });
        }

        if shared_bucket {
            if let Some(existing) = self.storage.cost_centers.get_shared_bucket()? {
                return Err(FamfinError::Validation(format!(
                    "A shared bucket already exists: {}",
                    existing.name
                )));
            }
        }

        let mut cost_center = if shared_bucket {
            CostCenter::shared_bucket(name)
        } else {
            CostCenter::new(name)
        };
        cost_center.default_split_percentage = default_split_percentage;
        cost_center
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.cost_centers.upsert(cost_center.clone())?;
        self.storage.cost_centers.save()?;

        self.storage.log_create(
            EntityType::CostCenter,
            cost_center.id.to_string(),
            Some(cost_center.name.clone()),
            &cost_center,
        )?;

        info!(cost_center = %cost_center.name, "created cost center");
        self.warn_if_defaults_unbalanced()?;
        Ok(cost_center)
    }

    pub fn get(&self, id: CostCenterId) -> FamfinResult<Option<CostCenter>> {
        self.storage.cost_centers.get(id)
    }

    /// Find a cost center by name, falling back to parsing an id
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<CostCenter>> {
        if let Some(cost_center) = self.storage.cost_centers.get_by_name(identifier)? {
            return Ok(Some(cost_center));
        }

        if let Ok(id) = identifier.parse::<CostCenterId>() {
            return self.storage.cost_centers.get(id);
        }

        Ok(None)
    }

    /// Like `find`, but a miss is an error
    pub fn require(&self, identifier: &str) -> FamfinResult<CostCenter> {
        self.find(identifier)?
            .ok_or_else(|| FamfinError::cost_center_not_found(identifier))
    }

    pub fn list(&self) -> FamfinResult<Vec<CostCenter>> {
        self.storage.cost_centers.get_all()
    }

    pub fn list_active(&self) -> FamfinResult<Vec<CostCenter>> {
        self.storage.cost_centers.get_active()
    }

    /// Sum of default split percentages over parties that receive default shares
    pub fn default_split_total(&self) -> FamfinResult<f64> {
        Ok(self
            .list_active()?
            .iter()
            .filter(|cc| cc.receives_default_share())
            .filter_map(|cc| cc.default_split_percentage)
            .sum())
    }

    pub fn set_default_split(
        &self,
        id: CostCenterId,
        percentage: Option<f64>,
    ) -> FamfinResult<CostCenter> {
        let mut cost_center = self
            .storage
            .cost_centers
            .get(id)?
            .ok_or_else(|| FamfinError::cost_center_not_found(id.to_string()))?;
        let before = cost_center.clone();

        cost_center.set_default_split(percentage);
        cost_center
            .validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        self.storage.cost_centers.upsert(cost_center.clone())?;
        self.storage.cost_centers.save()?;

        self.storage.log_update(
            EntityType::CostCenter,
            cost_center.id.to_string(),
            Some(cost_center.name.clone()),
            &before,
            &cost_center,
            Some(format!(
                "default split: {} -> {}",
                format_pct(before.default_split_percentage),
                format_pct(cost_center.default_split_percentage)
            )),
        )?;

        self.warn_if_defaults_unbalanced()?;
        Ok(cost_center)
    }

    /// Mark a cost center inactive; it stops receiving default shares
    pub fn deactivate(&self, id: CostCenterId) -> FamfinResult<CostCenter> {
        let mut cost_center = self
            .storage
            .cost_centers
            .get(id)?
            .ok_or_else(|| FamfinError::cost_center_not_found(id.to_string()))?;

        if !cost_center.is_active {
            return Ok(cost_center);
        }

        let before = cost_center.clone();
        cost_center.deactivate();

        self.storage.cost_centers.upsert(cost_center.clone())?;
        self.storage.cost_centers.save()?;

        self.storage.log_update(
            EntityType::CostCenter,
            cost_center.id.to_string(),
            Some(cost_center.name.clone()),
            &before,
            &cost_center,
            Some("active: true -> false".into()),
        )?;

        info!(cost_center = %cost_center.name, "deactivated cost center");
        Ok(cost_center)
    }

    fn warn_if_defaults_unbalanced(&self) -> FamfinResult<()> {
        let total = self.default_split_total()?;
        if total > 0.0 && (total - 100.0).abs() > 0.01 {
            warn!(total, "default split percentages do not sum to 100%");
        }
        Ok(())
    }
}

fn format_pct(pct: Option<f64>) -> String {
    pct.map_or_else(|| "none".to_string(), |p| format!("{}%", p))
}
