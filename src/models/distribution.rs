//! Distribution rows: one category's share of a monthly income
//!
//! Distributions are derived values. They are computed fresh from an income,
//! an investment rate, and the category list; edited in memory; and only
//! persisted (as budget rows) when the user confirms them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::BudgetCategory;
use super::ids::CategoryId;
use super::macro_group::MacroGroup;
use super::money::Money;

/// One category's computed allocation of a given income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// `None` for placeholder rows
    pub category_id: Option<CategoryId>,

    pub category_name: String,

    pub macro_group: MacroGroup,

    /// Share of income, 0-100, fractional
    pub percentage: f64,

    /// Within one cent of `income * percentage / 100`; the rows of one
    /// distribution add up to the income exactly
    pub amount: Money,

    /// True when the macro group had no category and this row stands in for it
    #[serde(default)]
    pub is_placeholder: bool,

    /// True when the user set this row's percentage by hand
    #[serde(default)]
    pub is_manual: bool,
}

impl Distribution {
    /// Create a row for a real category
    pub fn for_category(
        category: &BudgetCategory,
        macro_group: MacroGroup,
        percentage: f64,
        amount: Money,
    ) -> Self {
        Self {
            category_id: Some(category.id),
            category_name: category.name.clone(),
            macro_group,
            percentage,
            amount,
            is_placeholder: false,
            is_manual: false,
        }
    }

    /// Create a placeholder row holding a whole macro group
    pub fn placeholder(macro_group: MacroGroup, percentage: f64, amount: Money) -> Self {
        Self {
            category_id: None,
            category_name: macro_group.label().to_string(),
            macro_group,
            percentage,
            amount,
            is_placeholder: true,
            is_manual: false,
        }
    }

    /// Whether this row refers to the given category name or id string
    pub fn refers_to(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        if self.category_name.eq_ignore_ascii_case(identifier) {
            return true;
        }
        match (self.category_id, identifier.parse::<CategoryId>()) {
            (Some(id), Ok(parsed)) => id == parsed,
            _ => false,
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {:.2}% = {}",
            self.category_name, self.macro_group, self.percentage, self.amount
        )
    }
}
