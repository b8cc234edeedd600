//! CLI command handlers
//!
//! This module contains the command handlers for the CLI interface.
//! Each handler parses its arguments, calls into the services layer and
//! prints the formatted result.

pub mod budget;
pub mod category;
pub mod cost_center;
pub mod export;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use cost_center::{handle_cost_center_command, CostCenterCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::error::{FamfinError, FamfinResult};
use crate::models::{Money, MonthYear};

/// Parse a money argument such as "5000", "5,000.00" or "$12.50"
pub(crate) fn parse_money(value: &str) -> FamfinResult<Money> {
    Money::parse(value)
        .map_err(|e| FamfinError::Validation(format!("Invalid amount '{}': {}", value, e)))
}

/// Parse an optional `YYYY-MM` argument, defaulting to the current month
pub(crate) fn parse_month(value: Option<&str>) -> FamfinResult<MonthYear> {
    match value {
        Some(s) => MonthYear::parse(s).map_err(|e| {
            FamfinError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-01)", e))
        }),
        None => Ok(MonthYear::current()),
    }
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_date(value: Option<&str>) -> FamfinResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FamfinError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Split a `NAME=VALUE` argument
///
/// The name may itself contain `=`; the value is everything after the last one.
pub(crate) fn parse_assignment(arg: &str) -> FamfinResult<(String, String)> {
    match arg.rsplit_once('=') {
        Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(FamfinError::Validation(format!(
            "Expected NAME=VALUE, got '{}'",
            arg
        ))),
    }
}

/// Parse a percentage value, with or without a trailing `%`
pub(crate) fn parse_percentage(value: &str) -> FamfinResult<f64> {
    let trimmed = value.trim().trim_end_matches('%');
    let pct: f64 = trimmed
        .parse()
        .map_err(|_| FamfinError::Validation(format!("Invalid percentage '{}'", value)))?;
    if !pct.is_finite() || pct < 0.0 {
        return Err(FamfinError::Validation(format!(
            "Percentage must be zero or more, got '{}'",
            value
        )));
    }
    Ok(pct)
}
