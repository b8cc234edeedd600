//! Transaction model
//!
//! Expenses and income rows, attributed either to one cost center, to several
//! through explicit splits, or to everyone through the "shared" flag.
//! Amounts are stored positive; the kind says which way money moved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::deserialize_category_name;
use super::ids::{CostCenterId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[default]
    Expense,
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// One participant's share of a transaction
///
/// Carries either a percentage or a precomputed amount. When both are absent
/// the share is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub cost_center_id: CostCenterId,

    #[serde(default)]
    pub percentage: Option<f64>,

    #[serde(default)]
    pub amount: Option<Money>,
}

impl Split {
    /// A split with a fixed amount
    pub fn with_amount(cost_center_id: CostCenterId, amount: Money) -> Self {
        Self {
            cost_center_id,
            percentage: None,
            amount: Some(amount),
        }
    }

    /// A split expressed as a percentage of the transaction
    pub fn with_percentage(cost_center_id: CostCenterId, percentage: f64) -> Self {
        Self {
            cost_center_id,
            percentage: Some(percentage),
            amount: None,
        }
    }

    /// The split's own amount before any rescaling
    ///
    /// A stored amount wins over a percentage.
    pub fn nominal_amount(&self, transaction_amount: Money) -> Money {
        match (self.amount, self.percentage) {
            (Some(amount), _) => amount,
            (None, Some(pct)) => transaction_amount.percent(pct),
            (None, None) => Money::zero(),
        }
    }
}

/// Position of a row within a credit-card installment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number
    pub number: u32,
    pub total: u32,
}

impl fmt::Display for Installment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.total)
    }
}

/// An expense or income record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(default)]
    pub kind: TransactionKind,

    pub date: NaiveDate,

    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// Category name, normalized from either a string or a `{name}` object
    #[serde(default, deserialize_with = "deserialize_category_name")]
    pub category: Option<String>,

    /// Single responsible party, used when there are no splits and the row isn't shared
    #[serde(default)]
    pub cost_center_id: Option<CostCenterId>,

    #[serde(default)]
    pub is_shared: bool,

    #[serde(default)]
    pub splits: Vec<Split>,

    #[serde(default)]
    pub installment: Option<Installment>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, date: NaiveDate, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            date,
            amount,
            description: String::new(),
            category: None,
            cost_center_id: None,
            is_shared: false,
            splits: Vec::new(),
            installment: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn expense(date: NaiveDate, amount: Money) -> Self {
        Self::new(TransactionKind::Expense, date, amount)
    }

    pub fn income(date: NaiveDate, amount: Money) -> Self {
        Self::new(TransactionKind::Income, date, amount)
    }

    pub fn has_splits(&self) -> bool {
        !self.splits.is_empty()
    }

    /// Attribute the whole amount to a single cost center
    pub fn assign_to(&mut self, cost_center_id: CostCenterId) {
        self.cost_center_id = Some(cost_center_id);
        self.updated_at = Utc::now();
    }

    pub fn add_split(&mut self, split: Split) {
        self.splits.push(split);
        self.updated_at = Utc::now();
    }

    pub fn mark_shared(&mut self) {
        self.is_shared = true;
        self.updated_at = Utc::now();
    }

    /// Sum of the splits' nominal amounts (may differ from `amount`)
    pub fn splits_total(&self) -> Money {
        self.splits
            .iter()
            .map(|s| s.nominal_amount(self.amount))
            .sum()
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if let Some(installment) = self.installment {
            if installment.total == 0
                || installment.number == 0
                || installment.number > installment.total
            {
                return Err(TransactionValidationError::InvalidInstallment(installment));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.description,
            self.amount
        )
    }
}

/// Validation errors for transactions
///
/// Split totals are deliberately not checked: over- and under-allocated
/// splits are tolerated and handled by the split calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    InvalidInstallment(Installment),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
            Self::InvalidInstallment(installment) => {
                write!(f, "Invalid installment {}", installment)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
