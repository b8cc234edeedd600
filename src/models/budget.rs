//! Budget model
//!
//! The persisted form of a confirmed distribution: a spending limit for one
//! category in one month.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::period::MonthYear;

/// A monthly limit for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub category_id: CategoryId,

    pub month_year: MonthYear,

    pub limit_amount: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(category_id: CategoryId, month_year: MonthYear, limit_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            category_id,
            month_year,
            limit_amount,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_limit(&mut self, limit_amount: Money) {
        self.limit_amount = limit_amount;
        self.updated_at = Utc::now();
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.limit_amount.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} limit: {}", self.month_year, self.limit_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
