//! CSV export
//!
//! Spreadsheet-friendly exports of saved budgets and transactions.

use std::io::Write;

use crate::error::{FamfinError, FamfinResult};
use crate::models::{CostCenter, MonthYear};
use crate::storage::Storage;

fn export_error(e: csv::Error) -> FamfinError {
    FamfinError::Export(e.to_string())
}

/// Export saved budget rows, optionally limited to one month
///
/// Returns the number of data rows written.
pub fn export_budgets_csv<W: Write>(
    storage: &Storage,
    writer: W,
    month: Option<MonthYear>,
) -> FamfinResult<usize> {
    let categories = storage.categories.get_all()?;
    let budgets = match month {
        Some(month) => storage.budgets.get_for_month(month)?,
        None => storage.budgets.get_all()?,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["Month", "Category", "Group", "Limit"])
        .map_err(export_error)?;

    for budget in &budgets {
        let category = categories.iter().find(|c| c.id == budget.category_id);
        let name = category.map_or_else(|| budget.category_id.to_string(), |c| c.name.clone());
        let group = category
            .and_then(|c| c.macro_group)
            .map_or("any", |g| g.label());

        csv_writer
            .write_record([
                budget.month_year.to_string(),
                name,
                group.to_string(),
                format!("{:.2}", budget.limit_amount.to_decimal()),
            ])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(|e| FamfinError::Export(e.to_string()))?;
    Ok(budgets.len())
}

/// Export all transactions, one row per transaction
///
/// Returns the number of data rows written.
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> FamfinResult<usize> {
    let cost_centers = storage.cost_centers.get_all()?;
    let transactions = storage.transactions.get_all()?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record([
            "ID",
            "Date",
            "Kind",
            "Description",
            "Category",
            "Cost Center",
            "Shared",
            "Splits",
            "Installment",
            "Amount",
        ])
        .map_err(export_error)?;

    for txn in &transactions {
        let cost_center = txn
            .cost_center_id
            .map(|id| cost_center_name(&cost_centers, id))
            .unwrap_or_default();
        let splits = txn
            .splits
            .iter()
            .map(|s| cost_center_name(&cost_centers, s.cost_center_id))
            .collect::<Vec<_>>()
            .join(";");

        csv_writer
            .write_record([
                txn.id.as_uuid().to_string(),
                txn.date.to_string(),
                txn.kind.to_string(),
                txn.description.clone(),
                txn.category.clone().unwrap_or_default(),
                cost_center,
                txn.is_shared.to_string(),
                splits,
                txn.installment.map(|i| i.to_string()).unwrap_or_default(),
                format!("{:.2}", txn.amount.to_decimal()),
            ])
            .map_err(export_error)?;
    }

    csv_writer.flush().map_err(|e| FamfinError::Export(e.to_string()))?;
    Ok(transactions.len())
}

fn cost_center_name(cost_centers: &[CostCenter], id: crate::models::CostCenterId) -> String {
    cost_centers
        .iter()
        .find(|cc| cc.id == id)
        .map_or_else(|| id.to_string(), |cc| cc.name.clone())
}
