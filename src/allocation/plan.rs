//! Editing session state for a distribution
//!
//! An `AllocationPlan` owns the inputs and the current rows of one budgeting
//! session. Front ends hold one of these and feed user edits through it
//! instead of keeping loose form state around.

use super::{
    adjust_to_100_percent, calculate_distribution, set_percentage, total_percentage,
    validate_distribution_with, AllocationPolicy, DEFAULT_TOLERANCE,
};
use crate::models::{BudgetCategory, Distribution, MacroGroup, Money};

/// Totals for one macro group
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotal {
    pub macro_group: MacroGroup,
    pub percentage: f64,
    pub amount: Money,
}

/// A distribution being built and edited
#[derive(Debug, Clone)]
pub struct AllocationPlan {
    income: Money,
    investment_percentage: u8,
    tolerance: f64,
    rows: Vec<Distribution>,
}

impl AllocationPlan {
    /// Compute the initial distribution
    pub fn new(
        income: Money,
        investment_percentage: u8,
        categories: &[BudgetCategory],
        policy: &AllocationPolicy,
    ) -> Self {
        Self {
            income,
            investment_percentage,
            tolerance: DEFAULT_TOLERANCE,
            rows: calculate_distribution(income, investment_percentage, categories, policy),
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn income(&self) -> Money {
        self.income
    }

    pub fn investment_percentage(&self) -> u8 {
        self.investment_percentage
    }

    pub fn rows(&self) -> &[Distribution] {
        &self.rows
    }

    /// False when income was zero and there is nothing to edit
    pub fn is_computable(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Set a row's percentage by category name or id, then renormalize
    ///
    /// Returns false (and changes nothing) when no row matches.
    pub fn edit(&mut self, category: &str, percentage: f64) -> bool {
        match self.rows.iter().position(|r| r.refers_to(category)) {
            Some(index) => self.edit_index(index, percentage),
            None => false,
        }
    }

    /// Set a row's percentage by position, then renormalize
    pub fn edit_index(&mut self, index: usize, percentage: f64) -> bool {
        if !set_percentage(&mut self.rows, index, percentage) {
            return false;
        }
        self.rows = adjust_to_100_percent(&self.rows, self.income);
        true
    }

    /// Whether the rows sum to 100% within the plan's tolerance
    pub fn is_valid(&self) -> bool {
        validate_distribution_with(&self.rows, self.tolerance)
    }

    pub fn total_percentage(&self) -> f64 {
        total_percentage(&self.rows)
    }

    pub fn total_amount(&self) -> Money {
        self.rows.iter().map(|r| r.amount).sum()
    }

    /// Per-group totals in distribution order
    pub fn totals_by_group(&self) -> Vec<GroupTotal> {
        MacroGroup::all()
            .iter()
            .map(|group| {
                let rows = self.rows.iter().filter(|r| r.macro_group == *group);
                let (percentage, amount) = rows.fold((0.0, Money::zero()), |(p, a), r| {
                    (p + r.percentage, a + r.amount)
                });
                GroupTotal {
                    macro_group: *group,
                    percentage,
                    amount,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> AllocationPlan {
        let categories = vec![
            BudgetCategory::new("Housing", Some(MacroGroup::Needs)),
            BudgetCategory::new("Groceries", Some(MacroGroup::Needs)),
            BudgetCategory::new("Dining Out", Some(MacroGroup::Wants)),
        ];
        AllocationPlan::new(
            Money::from_cents(500_000),
            20,
            &categories,
            &AllocationPolicy::default(),
        )
    }

    #[test]
    fn test_new_plan() {
        let plan = plan();
        assert!(plan.is_computable());
        assert!(plan.is_valid());
        assert_eq!(plan.rows().len(), 4); // investments placeholder
        assert_eq!(plan.total_amount(), Money::from_cents(500_000));
    }

    #[test]
    fn test_zero_income_not_computable() {
        let plan = AllocationPlan::new(Money::zero(), 20, &[], &AllocationPolicy::default());
        assert!(!plan.is_computable());
        assert!(!plan.is_valid());
    }

    #[test]
    fn test_edit_by_name() {
        let mut plan = plan();
        assert!(plan.edit("dining out", 10.0));
        assert!(plan.is_valid());

        let dining = plan.rows().iter().find(|r| r.category_name == "Dining Out").unwrap();
        assert_eq!(dining.percentage, 10.0);
        assert!(dining.is_manual);
        assert_eq!(dining.amount.cents(), 50_000);

        assert!(!plan.edit("Vacation", 5.0));
    }

    #[test]
    fn test_successive_edits_keep_earlier_ones() {
        let mut plan = plan();
        plan.edit("Housing", 30.0);
        plan.edit("Groceries", 30.0);

        let housing = plan.rows().iter().find(|r| r.category_name == "Housing").unwrap();
        assert_eq!(housing.percentage, 30.0);
        assert!(plan.is_valid());
    }

    #[test]
    fn test_totals_by_group() {
        let plan = plan();
        let totals = plan.totals_by_group();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].macro_group, MacroGroup::Needs);
        assert!((totals[0].percentage - 50.0).abs() < 1e-9);
        assert_eq!(totals[1].amount.cents(), 150_000);
        assert_eq!(totals[2].amount.cents(), 100_000);
    }
}
