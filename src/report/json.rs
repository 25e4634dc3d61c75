use std::io::Write;

use anyhow::Result;
use serde::Serialize;

/// Pretty-printed JSON array of records.
pub fn write_json<T: Serialize, W: Write>(records: &[T], writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}
