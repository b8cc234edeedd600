//! Allocation engine
//!
//! Turns a monthly income and a target investment rate into a percentage and
//! amount per budget category, grouped into the three macro groups, and lets
//! a user edit individual percentages while the total stays pinned at 100%.
//!
//! Everything here is pure and synchronous: no I/O, no shared state. The
//! functions are cheap enough to re-run on every edit.
//!
//! # Example
//!
//! ```
//! use famfin::allocation::{calculate_distribution, validate_distribution, AllocationPolicy};
//! use famfin::models::{BudgetCategory, MacroGroup, Money};
//!
//! let categories = vec![
//!     BudgetCategory::new("Rent", Some(MacroGroup::Needs)),
//!     BudgetCategory::new("Dining Out", Some(MacroGroup::Wants)),
//!     BudgetCategory::new("Retirement", Some(MacroGroup::Investments)),
//! ];
//! let rows = calculate_distribution(
//!     Money::from_cents(500_000),
//!     20,
//!     &categories,
//!     &AllocationPolicy::default(),
//! );
//! assert!(validate_distribution(&rows));
//! assert_eq!(rows[2].amount, Money::from_cents(100_000));
//! ```

mod adjust;
mod engine;
mod plan;

pub use adjust::{adjust_to_100_percent, set_percentage};
pub use engine::{
    apportion, calculate_distribution, total_percentage, validate_distribution,
    validate_distribution_with, DEFAULT_TOLERANCE,
};
pub use plan::{AllocationPlan, GroupTotal};

use crate::models::MacroGroup;

/// Policy constants for splitting income between the macro groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationPolicy {
    /// Share (0-100) of the non-investment remainder given to needs; wants get the rest
    pub needs_share_of_remaining: f64,
}

impl AllocationPolicy {
    pub fn new(needs_share_of_remaining: f64) -> Self {
        Self {
            needs_share_of_remaining,
        }
    }

    /// Percentage points for each macro group, in distribution order
    pub fn group_percentages(&self, investment_percentage: u8) -> [(MacroGroup, f64); 3] {
        let investments = f64::from(investment_percentage);
        let remaining = 100.0 - investments;
        let needs = remaining * self.needs_share_of_remaining / 100.0;
        let wants = remaining - needs;
        [
            (MacroGroup::Needs, needs),
            (MacroGroup::Wants, wants),
            (MacroGroup::Investments, investments),
        ]
    }
}

impl Default for AllocationPolicy {
    /// 50/30/20 at the default 20% investment rate
    fn default() -> Self {
        Self::new(62.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_50_30_20() {
        let groups = AllocationPolicy::default().group_percentages(20);
        assert_eq!(groups[0], (MacroGroup::Needs, 50.0));
        assert_eq!(groups[1], (MacroGroup::Wants, 30.0));
        assert_eq!(groups[2], (MacroGroup::Investments, 20.0));
    }

    #[test]
    fn test_group_percentages_always_sum_to_100() {
        let policy = AllocationPolicy::new(55.0);
        for investment in 0..=80u8 {
            let total: f64 = policy
                .group_percentages(investment)
                .iter()
                .map(|(_, pct)| pct)
                .sum();
            assert!((total - 100.0).abs() < 1e-9, "investment {}", investment);
        }
    }
}
