//! Macro groups: the three top-level budget buckets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three top-level budget buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroGroup {
    /// Essential spending (housing, groceries, health)
    Needs,
    /// Discretionary spending
    Wants,
    /// Savings and investments
    Investments,
}

impl MacroGroup {
    /// All groups in distribution order
    pub fn all() -> &'static [Self] {
        &[Self::Needs, Self::Wants, Self::Investments]
    }

    /// Human-readable label, also used as the placeholder row name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Investments => "Investments",
        }
    }
}

impl fmt::Display for MacroGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MacroGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "needs" | "need" => Ok(Self::Needs),
            "wants" | "want" => Ok(Self::Wants),
            "investments" | "investment" | "savings" => Ok(Self::Investments),
            other => Err(format!(
                "Unknown macro group '{}' (expected needs, wants or investments)",
                other
            )),
        }
    }
}
