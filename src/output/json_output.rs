//! JSON export

use crate::output::ensure_parent_dir;
use crate::record::Record;
use crate::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes all records as one pretty-printed JSON array
///
/// Parent directories are created as needed.
pub fn export_to_json(records: &[Record], output_path: &Path) -> OutputResult<()> {
    ensure_parent_dir(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    tracing::info!("Wrote JSON output to {}", output_path.display());
    Ok(())
}
