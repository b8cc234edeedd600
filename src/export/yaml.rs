//! YAML export
//!
//! Same document as the JSON export, in a human-readable form.

use std::io::Write;

use crate::error::{FamfinError, FamfinResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full database to YAML, preceded by a comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> FamfinResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# famfin full database export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| FamfinError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FamfinError::Export(e.to_string()))
}

/// Parse and validate a YAML export
pub fn import_from_yaml(yaml_str: &str) -> FamfinResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| FamfinError::Validation(e.to_string()))?;
    export.validate().map_err(FamfinError::Validation)?;
    Ok(export)
}
