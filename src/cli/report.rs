//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::parse_month;
use crate::error::{FamfinError, FamfinResult};
use crate::models::TransactionKind;
use crate::reports::ResponsibleReport;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals per responsible party for a month
    #[command(alias = "by-person")]
    Responsible {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Report income instead of expenses
        #[arg(long)]
        income: bool,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> FamfinResult<()> {
    match cmd {
        ReportCommands::Responsible {
            month,
            income,
            output,
        } => handle_responsible_report(storage, month, income, output),
    }
}

fn handle_responsible_report(
    storage: &Storage,
    month: Option<String>,
    income: bool,
    output: Option<PathBuf>,
) -> FamfinResult<()> {
    let month = parse_month(month.as_deref())?;
    let kind = if income {
        TransactionKind::Income
    } else {
        TransactionKind::Expense
    };

    let report = ResponsibleReport::generate(storage, month, kind)?;

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                FamfinError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.export_csv(BufWriter::new(file))?;
            println!("Report exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal()),
    }

    Ok(())
}
