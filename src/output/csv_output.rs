//! CSV export
//!
//! Records are flattened to one row each: arrays and objects become JSON
//! text cells, nulls become empty cells.

use crate::output::ensure_parent_dir;
use crate::record::Record;
use crate::OutputResult;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Writes records as CSV
///
/// The column set is the sorted key set of the first record. With no
/// records nothing is written and a warning is logged.
pub fn export_to_csv(records: &[Record], output_path: &Path) -> OutputResult<()> {
    if records.is_empty() {
        tracing::warn!("No records to export to CSV.");
        return Ok(());
    }

    let rows = records
        .iter()
        .map(flatten_record)
        .collect::<OutputResult<Vec<_>>>()?;

    let columns: Vec<&String> = rows[0].keys().collect();

    ensure_parent_dir(output_path)?;
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(&columns)?;
    for row in &rows {
        writer.write_record(
            columns
                .iter()
                .map(|column| row.get(*column).map(String::as_str).unwrap_or("")),
        )?;
    }
    writer.flush()?;

    tracing::info!("Wrote CSV output to {}", output_path.display());
    Ok(())
}

/// Flattens a record into column name → cell text, ordered by column name
pub fn flatten_record(record: &Record) -> OutputResult<BTreeMap<String, String>> {
    let value = serde_json::to_value(record)?;
    let mut flat = BTreeMap::new();

    if let Value::Object(fields) = value {
        for (key, field) in fields {
            flat.insert(key, cell_text(&field)?);
        }
    }

    Ok(flat)
}

fn cell_text(value: &Value) -> OutputResult<String> {
    Ok(match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
        other => other.to_string(),
    })
}
