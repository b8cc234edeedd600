//! Budget service
//!
//! Proposes a distribution of a monthly income over the categories and, once
//! the user has confirmed it, persists it as per-category monthly limits.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::allocation::AllocationPlan;
use crate::audit::EntityType;
use crate::config::AllocationSettings;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{Budget, CategoryId, MacroGroup, Money, MonthYear};
use crate::storage::Storage;

/// A saved budget row joined with its category
#[derive(Debug, Clone)]
pub struct BudgetLine {
    pub budget: Budget,
    pub category_name: String,
    pub macro_group: Option<MacroGroup>,
}

/// Service for monthly budget planning
pub struct BudgetService<'a> {
    storage: &'a Storage,
    settings: &'a AllocationSettings,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a AllocationSettings) -> Self {
        Self { storage, settings }
    }

    /// Propose a distribution of `income`
    ///
    /// The investment percentage falls back to the configured default and is
    /// clamped to the configured maximum.
    pub fn plan(&self, income: Money, investment_percentage: Option<i64>) -> FamfinResult<AllocationPlan> {
        let requested = investment_percentage
            .unwrap_or_else(|| i64::from(self.settings.default_investment_percentage));
        let investment = self.settings.clamp_investment(requested);
        if i64::from(investment) != requested {
            debug!(requested, clamped = investment, "investment percentage clamped");
        }

        let categories = self.storage.categories.get_all()?;
        let plan = AllocationPlan::new(income, investment, &categories, &self.settings.policy())
            .with_tolerance(self.settings.tolerance);

        debug!(
            %income,
            investment,
            rows = plan.rows().len(),
            "computed budget distribution"
        );
        Ok(plan)
    }

    /// Persist a confirmed plan as budget rows for `month`
    ///
    /// Placeholder rows have no category and are skipped. A category that
    /// appears in several groups gets one row holding the summed amount.
    pub fn save_plan(&self, plan: &AllocationPlan, month: MonthYear) -> FamfinResult<Vec<Budget>> {
        if !plan.is_computable() {
            return Err(FamfinError::Budget(
                "income must be greater than zero".into(),
            ));
        }
        if !plan.is_valid() {
            return Err(FamfinError::Budget(format!(
                "percentages must sum to 100% (currently {:.2}%)",
                plan.total_percentage()
            )));
        }

        let mut order: Vec<CategoryId> = Vec::new();
        let mut limits: HashMap<CategoryId, Money> = HashMap::new();
        for row in plan.rows() {
            let Some(category_id) = row.category_id else {
                continue;
            };
            if !limits.contains_key(&category_id) {
                order.push(category_id);
            }
            *limits.entry(category_id).or_default() += row.amount;
        }

        // Stage every row first; a failing row leaves storage and the audit log untouched
        let mut staged = Vec::with_capacity(order.len());
        for category_id in order {
            let limit = limits.get(&category_id).copied().unwrap_or_default();
            let category = self
                .storage
                .categories
                .get(category_id)?
                .ok_or_else(|| FamfinError::category_not_found(category_id.to_string()))?;

            let existing = self.storage.budgets.get(category_id, month)?;
            let budget = match &existing {
                Some(before) => {
                    let mut budget = before.clone();
                    budget.set_limit(limit);
                    budget
                }
                None => Budget::new(category_id, month, limit),
            };
            budget
                .validate()
                .map_err(|e| FamfinError::Validation(e.to_string()))?;

            staged.push((existing, budget, category.name));
        }

        for (_, budget, _) in &staged {
            self.storage.budgets.upsert(budget.clone())?;
        }
        self.storage.budgets.save()?;

        let mut saved = Vec::with_capacity(staged.len());
        for (existing, budget, category_name) in staged {
            let entity_id = format!("{}:{}", budget.category_id, month);
            match existing {
                Some(before) => self.storage.log_update(
                    EntityType::Budget,
                    entity_id,
                    Some(category_name),
                    &before,
                    &budget,
                    Some(format!("limit: {} -> {}", before.limit_amount, budget.limit_amount)),
                )?,
                None => self.storage.log_create(
                    EntityType::Budget,
                    entity_id,
                    Some(category_name),
                    &budget,
                )?,
            }
            saved.push(budget);
        }

        info!(%month, rows = saved.len(), "saved budget");
        Ok(saved)
    }

    /// Saved budget rows for a month, in category order
    pub fn list_for_month(&self, month: MonthYear) -> FamfinResult<Vec<BudgetLine>> {
        let budgets = self.storage.budgets.get_for_month(month)?;
        let categories = self.storage.categories.get_all()?;

        let mut lines: Vec<BudgetLine> = budgets
            .into_iter()
            .map(|budget| {
                let category = categories.iter().find(|c| c.id == budget.category_id);
                BudgetLine {
                    category_name: category
                        .map_or_else(|| budget.category_id.to_string(), |c| c.name.clone()),
                    macro_group: category.and_then(|c| c.macro_group),
                    budget,
                }
            })
            .collect();

        let position = |id: CategoryId| {
            categories
                .iter()
                .position(|c| c.id == id)
                .unwrap_or(categories.len())
        };
        lines.sort_by_key(|line| position(line.budget.category_id));
        Ok(lines)
    }

    /// Sum of all limits saved for a month
    pub fn total_for_month(&self, month: MonthYear) -> FamfinResult<Money> {
        Ok(self
            .storage
            .budgets
            .get_for_month(month)?
            .iter()
            .map(|b| b.limit_amount)
            .sum())
    }
}
