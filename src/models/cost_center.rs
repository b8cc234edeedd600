//! Cost center model
//!
//! A cost center is a responsible party for expenses and income: a person in
//! the household, or the organization-wide "shared" bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CostCenterId;

/// A responsible party for expense/income attribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostCenter {
    pub id: CostCenterId,

    pub name: String,

    /// Share (0-100) this party carries of a shared transaction with no explicit splits
    #[serde(default)]
    pub default_split_percentage: Option<f64>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// The organization-wide bucket; never receives a default share itself
    #[serde(default)]
    pub is_shared_bucket: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl CostCenter {
    /// Create a new active individual cost center
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CostCenterId::new(),
            name: name.into(),
            default_split_percentage: None,
            is_active: true,
            is_shared_bucket: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an individual cost center with a default split percentage
    pub fn with_default_split(name: impl Into<String>, percentage: f64) -> Self {
        let mut cost_center = Self::new(name);
        cost_center.default_split_percentage = Some(percentage);
        cost_center
    }

    /// Create the shared bucket
    pub fn shared_bucket(name: impl Into<String>) -> Self {
        let mut cost_center = Self::new(name);
        cost_center.is_shared_bucket = true;
        cost_center
    }

    /// Whether this cost center takes part in the default split of shared transactions
    pub fn receives_default_share(&self) -> bool {
        self.is_active && !self.is_shared_bucket
    }

    pub fn set_default_split(&mut self, percentage: Option<f64>) {
        self.default_split_percentage = percentage;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CostCenterValidationError> {
        if self.name.trim().is_empty() {
            return Err(CostCenterValidationError::EmptyName);
        }

        if let Some(pct) = self.default_split_percentage {
            if !(0.0..=100.0).contains(&pct) {
                return Err(CostCenterValidationError::PercentageOutOfRange(pct));
            }
        }

        Ok(())
    }
}

impl fmt::Display for CostCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CostCenterValidationError {
    EmptyName,
    PercentageOutOfRange(f64),
}

impl fmt::Display for CostCenterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Cost center name cannot be empty"),
            Self::PercentageOutOfRange(pct) => {
                write!(f, "Default split must be between 0 and 100, got {}", pct)
            }
        }
    }
}

impl std::error::Error for CostCenterValidationError {}
