//! Budget CLI commands
//!
//! `budget plan` proposes a distribution of income across the macro groups,
//! applies any manual percentage edits and optionally saves the result as
//! the month's budget. `budget show` lists what was saved.

use clap::Subcommand;

use super::{parse_assignment, parse_money, parse_month, parse_percentage};
use crate::config::Settings;
use crate::display::{format_budget_lines, format_plan};
use crate::error::{FamfinError, FamfinResult};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Propose a distribution of income across categories
    Plan {
        /// Monthly income to distribute (e.g., "5000" or "5,000.00")
        #[arg(short, long)]
        income: String,

        /// Investment percentage (defaults to the configured rate)
        #[arg(long, allow_negative_numbers = true)]
        investment: Option<i64>,

        /// Set a category's percentage by hand (e.g., --set Housing=40)
        #[arg(long = "set", value_name = "NAME=PCT")]
        set: Vec<String>,

        /// Save the distribution as the month's budget
        #[arg(long)]
        save: bool,

        /// Month to save to (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show the saved budget for a month
    Show {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FamfinResult<()> {
    let service = BudgetService::new(storage, &settings.allocation);

    match cmd {
        BudgetCommands::Plan {
            income,
            investment,
            set,
            save,
            month,
        } => {
            let income = parse_money(&income)?;
            let mut plan = service.plan(income, investment)?;

            for assignment in &set {
                let (name, value) = parse_assignment(assignment)?;
                let percentage = parse_percentage(&value)?;
                if !plan.edit(&name, percentage) {
                    return Err(FamfinError::category_not_found(name));
                }
            }

            print!("{}", format_plan(&plan));

            if save {
                let month = parse_month(month.as_deref())?;
                let saved = service.save_plan(&plan, month)?;
                println!();
                println!("Saved {} budget rows for {}.", saved.len(), month);
            }
        }

        BudgetCommands::Show { month } => {
            let month = parse_month(month.as_deref())?;
            let lines = service.list_for_month(month)?;
            print!("{}", format_budget_lines(&month.to_string(), &lines));
        }
    }

    Ok(())
}
