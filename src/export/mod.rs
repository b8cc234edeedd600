//! Data export for famfin
//!
//! - CSV: saved budgets and transactions (spreadsheet-compatible)
//! - JSON: full machine-readable snapshot
//! - YAML: the same snapshot, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_budgets_csv, export_transactions_csv};
pub use self::json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::{export_full_yaml, import_from_yaml};
