//! Budget display formatting
//!
//! Renders a proposed distribution (with per-group subtotals and the
//! validation status) and saved monthly budgets.

use crate::allocation::AllocationPlan;
use crate::models::Money;
use crate::services::BudgetLine;

/// Format a distribution being planned
pub fn format_plan(plan: &AllocationPlan) -> String {
    if !plan.is_computable() {
        return "Nothing to distribute: income must be greater than zero.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "Income: {}   Investment rate: {}%\n\n",
        plan.income(),
        plan.investment_percentage()
    ));

    output.push_str(&format!(
        "{:<24} {:<12} {:>8} {:>12}\n",
        "Category", "Group", "%", "Amount"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for row in plan.rows() {
        let mut name = row.category_name.clone();
        if row.is_placeholder {
            name.push_str(" *");
        }
        if row.is_manual {
            name.push_str(" (set)");
        }
        output.push_str(&format!(
            "{:<24} {:<12} {:>7.2}% {:>12}\n",
            name,
            row.macro_group.label(),
            row.percentage,
            row.amount.to_string()
        ));
    }

    output.push_str(&"-".repeat(60));
    output.push('\n');

    for group in plan.totals_by_group() {
        output.push_str(&format!(
            "{:<24} {:<12} {:>7.2}% {:>12}\n",
            "",
            group.macro_group.label(),
            group.percentage,
            group.amount.to_string()
        ));
    }

    output.push_str(&format!(
        "{:<24} {:<12} {:>7.2}% {:>12}\n",
        "Total",
        "",
        plan.total_percentage(),
        plan.total_amount().to_string()
    ));

    if plan.rows().iter().any(|r| r.is_placeholder) {
        output.push_str("\n* no category in this group yet\n");
    }

    if plan.is_valid() {
        output.push_str("\nDistribution is valid.\n");
    } else {
        output.push_str(&format!(
            "\nWarning: percentages must sum to 100% (currently {:.2}%).\n",
            plan.total_percentage()
        ));
    }

    output
}

/// Format the saved budget rows of a month
pub fn format_budget_lines(month: &str, lines: &[BudgetLine]) -> String {
    if lines.is_empty() {
        return format!(
            "No budget saved for {}.\n\nRun 'famfin budget plan --income AMOUNT --save' first.\n",
            month
        );
    }

    let mut output = String::new();
    output.push_str(&format!("Budget for {}\n", month));
    output.push_str(&"=".repeat(50));
    output.push('\n');

    for line in lines {
        let group = line.macro_group.map_or("any", |g| g.label());
        output.push_str(&format!(
            "{:<24} {:<12} {:>12}\n",
            line.category_name,
            group,
            line.budget.limit_amount.to_string()
        ));
    }

    let total: Money = lines.iter().map(|l| l.budget.limit_amount).sum();
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&format!("{:<37} {:>12}\n", "Total", total.to_string()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationPolicy;
    use crate::models::{Budget, BudgetCategory, CategoryId, MacroGroup, MonthYear};

    fn plan() -> AllocationPlan {
        let categories = vec![
            BudgetCategory::new("Housing", Some(MacroGroup::Needs)),
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
    fn test_format_plan() {
        let output = format_plan(&plan());
        assert!(output.contains("Housing"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("Investments *"));
        assert!(output.contains("Distribution is valid."));
    }

    #[test]
    fn test_format_invalid_plan() {
        let mut plan = plan();
        plan.edit("Housing", 90.0);
        plan.edit("Dining Out", 30.0);
        let output = format_plan(&plan);
        assert!(output.contains("Housing (set)"));
        assert!(output.contains("percentages must sum to 100%"));
    }

    #[test]
    fn test_format_zero_income() {
        let plan = AllocationPlan::new(Money::zero(), 20, &[], &AllocationPolicy::default());
        assert!(format_plan(&plan).contains("Nothing to distribute"));
    }

    #[test]
    fn test_format_budget_lines() {
        let month = MonthYear::new(2025, 1).unwrap();
        let lines = vec![BudgetLine {
            budget: Budget::new(CategoryId::new(), month, Money::from_cents(250_000)),
            category_name: "Housing".into(),
            macro_group: Some(MacroGroup::Needs),
        }];

        let output = format_budget_lines("2025-01", &lines);
        assert!(output.contains("Budget for 2025-01"));
        assert!(output.contains("$2500.00"));
        assert!(format_budget_lines("2025-02", &[]).contains("No budget saved"));
    }
}
