//! JSON export
//!
//! Exports every record to one JSON document with a schema version, and
//! reads such a document back for verification.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FamfinError, FamfinResult};
use crate::models::{Budget, BudgetCategory, CostCenter, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Version of famfin that wrote the export
    pub app_version: String,

    pub categories: Vec<BudgetCategory>,

    pub cost_centers: Vec<CostCenter>,

    pub transactions: Vec<Transaction>,

    pub budgets: Vec<Budget>,

    pub metadata: ExportMetadata,
}

/// Counts and date range, for a quick look at an export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub cost_center_count: usize,
    pub transaction_count: usize,
    pub budget_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot everything currently loaded in storage
    pub fn from_storage(storage: &Storage) -> FamfinResult<Self> {
        let categories = storage.categories.get_all()?;
        let cost_centers = storage.cost_centers.get_all()?;
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;

        let metadata = ExportMetadata {
            category_count: categories.len(),
            cost_center_count: cost_centers.len(),
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            cost_centers,
            transactions,
            budgets,
            metadata,
        })
    }

    /// Check the schema version and that references point at known records
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();
        let cost_center_ids: HashSet<_> = self.cost_centers.iter().map(|c| c.id).collect();

        for txn in &self.transactions {
            let referenced = txn
                .cost_center_id
                .into_iter()
                .chain(txn.splits.iter().map(|s| s.cost_center_id));
            for id in referenced {
                if !cost_center_ids.contains(&id) {
                    return Err(format!(
                        "Transaction {} references unknown cost center {}",
                        txn.id, id
                    ));
                }
            }
        }

        for budget in &self.budgets {
            if !category_ids.contains(&budget.category_id) {
                return Err(format!(
                    "Budget for {} references unknown category {}",
                    budget.month_year, budget.category_id
                ));
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> FamfinResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FamfinError::Export(e.to_string()))
}

/// Parse and validate a JSON export
pub fn import_from_json(json_str: &str) -> FamfinResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate().map_err(FamfinError::Validation)?;
    Ok(export)
}
