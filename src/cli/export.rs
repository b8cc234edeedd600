//! CLI commands for data export
//!
//! Full snapshots go to JSON or YAML; saved budgets go to CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use super::parse_month;
use crate::error::{FamfinError, FamfinResult};
use crate::export::{
    export_budgets_csv, export_full_json, export_full_yaml, export_transactions_csv,
    import_from_json, import_from_yaml, FullExport,
};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full database)
    Json,
    /// YAML format (full database, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export saved budgets to CSV
    Budgets {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check that an export file parses and its references resolve
    Verify {
        /// Export file (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FamfinResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            compact,
        } => {
            let mut writer = create_writer(&output)?;
            match format {
                ExportFormat::Json => export_full_json(storage, &mut writer, !compact)?,
                ExportFormat::Yaml => export_full_yaml(storage, &mut writer)?,
            }
            writer
                .flush()
                .map_err(|e| FamfinError::Export(e.to_string()))?;
            println!("Full database exported to: {}", output.display());
        }

        ExportCommands::Budgets { output, month } => {
            let month = month.as_deref().map(|m| parse_month(Some(m))).transpose()?;
            let rows = export_budgets_csv(storage, create_writer(&output)?, month)?;
            println!("Exported {} budget rows to: {}", rows, output.display());
        }

        ExportCommands::Transactions { output } => {
            let rows = export_transactions_csv(storage, create_writer(&output)?)?;
            println!("Exported {} transactions to: {}", rows, output.display());
        }

        ExportCommands::Verify { file } => {
            let contents = std::fs::read_to_string(&file)
                .map_err(|e| FamfinError::Io(format!("Failed to read {}: {}", file.display(), e)))?;
            let is_yaml = matches!(
                file.extension().and_then(|e| e.to_str()),
                Some("yaml") | Some("yml")
            );
            let export = if is_yaml {
                import_from_yaml(&contents)?
            } else {
                import_from_json(&contents)?
            };

            println!("Export is valid: {}", file.display());
            println!(
                "  {} categories, {} cost centers, {} transactions, {} budget rows",
                export.categories.len(),
                export.cost_centers.len(),
                export.transactions.len(),
                export.budgets.len()
            );
        }

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;
            let metadata = &export.metadata;

            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("Categories:     {}", metadata.category_count);
            println!("Cost centers:   {}", metadata.cost_center_count);
            println!("Transactions:   {}", metadata.transaction_count);
            println!("Budget rows:    {}", metadata.budget_count);
            if let (Some(earliest), Some(latest)) =
                (&metadata.earliest_transaction, &metadata.latest_transaction)
            {
                println!("Date range:     {} to {}", earliest, latest);
            }
        }
    }

    Ok(())
}

fn create_writer(path: &Path) -> FamfinResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FamfinError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
