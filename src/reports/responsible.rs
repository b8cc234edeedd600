//! Responsible-party report
//!
//! Who paid (or earned) what in a month: individual and shared totals per
//! cost center, with each party's percentage of the month's total.

use std::io::Write;

use crate::error::{FamfinError, FamfinResult};
use crate::models::{Money, MonthYear, TransactionKind};
use crate::split::{ResponsibleEntry, ResponsibleTotals};
use crate::storage::Storage;

/// Monthly totals by responsible party for one transaction kind
#[derive(Debug, Clone)]
pub struct ResponsibleReport {
    pub month: MonthYear,
    pub kind: TransactionKind,
    pub transaction_count: usize,
    pub totals: ResponsibleTotals,
}

impl ResponsibleReport {
    /// Aggregate the month's transactions of `kind`
    pub fn generate(storage: &Storage, month: MonthYear, kind: TransactionKind) -> FamfinResult<Self> {
        let transactions: Vec<_> = storage
            .transactions
            .get_for_month(month)?
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect();
        let cost_centers = storage.cost_centers.get_all()?;

        Ok(Self {
            month,
            kind,
            transaction_count: transactions.len(),
            totals: ResponsibleTotals::aggregate(&transactions, &cost_centers),
        })
    }

    pub fn entries(&self) -> &[ResponsibleEntry] {
        &self.totals.entries
    }

    pub fn period_total(&self) -> Money {
        self.totals.period_total
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        let title = match self.kind {
            TransactionKind::Expense => "Expenses",
            TransactionKind::Income => "Income",
        };
        output.push_str(&format!("{} by Responsible Party: {}\n", title, self.month));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!("Total: {}\n", self.totals.period_total));
        output.push_str(&format!("Transactions: {}\n\n", self.transaction_count));

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>12} {:>7}\n",
            "Cost Center", "Individual", "Shared", "Total", "%"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for entry in &self.totals.entries {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>6.1}%\n",
                truncate(&entry.name, 24),
                entry.individual.to_string(),
                entry.shared.to_string(),
                entry.total.to_string(),
                entry.percentage
            ));
        }

        if !self.totals.unattributed.is_zero() {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>6.1}%\n",
                "(unattributed)",
                "",
                "",
                self.totals.unattributed.to_string(),
                self.totals
                    .unattributed
                    .percentage_of(self.totals.period_total)
            ));
        }

        output
    }

    /// Write the report as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FamfinResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(["Cost Center", "Individual", "Shared", "Total", "Percentage"])
            .map_err(|e| FamfinError::Export(e.to_string()))?;

        for entry in &self.totals.entries {
            csv_writer
                .write_record([
                    entry.name.clone(),
                    format!("{:.2}", entry.individual.to_decimal()),
                    format!("{:.2}", entry.shared.to_decimal()),
                    format!("{:.2}", entry.total.to_decimal()),
                    format!("{:.2}", entry.percentage),
                ])
                .map_err(|e| FamfinError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| FamfinError::Export(e.to_string()))
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
