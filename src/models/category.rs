//! Budget category model
//!
//! Categories are reference data: the allocation engine reads them but never
//! creates or edits them. Each category may be tagged with a macro group and a
//! default weight used when splitting that group's percentage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::macro_group::MacroGroup;

/// A budget category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub id: CategoryId,

    pub name: String,

    /// Macro group; `None` means the category satisfies every group
    #[serde(default)]
    pub macro_group: Option<MacroGroup>,

    /// Relative weight (0-100) inside the macro group
    #[serde(default)]
    pub default_percentage: Option<f64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl BudgetCategory {
    /// Create a new category in a macro group
    pub fn new(name: impl Into<String>, macro_group: Option<MacroGroup>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            macro_group,
            default_percentage: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a category with a default weight
    pub fn with_weight(name: impl Into<String>, macro_group: MacroGroup, weight: f64) -> Self {
        let mut category = Self::new(name, Some(macro_group));
        category.default_percentage = Some(weight);
        category
    }

    /// Whether this category is eligible for a macro group
    pub fn matches_group(&self, group: MacroGroup) -> bool {
        self.macro_group.map_or(true, |g| g == group)
    }

    pub fn set_default_percentage(&mut self, percentage: Option<f64>) {
        self.default_percentage = percentage;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if let Some(pct) = self.default_percentage {
            if !(0.0..=100.0).contains(&pct) {
                return Err(CategoryValidationError::PercentageOutOfRange(pct));
            }
        }

        Ok(())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    PercentageOutOfRange(f64),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::PercentageOutOfRange(pct) => {
                write!(f, "Default percentage must be between 0 and 100, got {}", pct)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// The shapes a category reference takes in ingested rows
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRef {
    Name(String),
    Object { name: Option<String> },
}

/// Normalize a category reference into its name
///
/// Rows coming from outside may carry `"category": "Groceries"` or
/// `"category": {"name": "Groceries", ...}`; both become `Some("Groceries")`.
/// Blank names and null become `None`.
pub fn deserialize_category_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<CategoryRef> = Option::deserialize(deserializer)?;
    let name = match raw {
        Some(CategoryRef::Name(name)) => Some(name),
        Some(CategoryRef::Object { name }) => name,
        None => None,
    };
    Ok(name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty()))
}
