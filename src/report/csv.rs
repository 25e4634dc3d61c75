//! CSV ledger: `Source Path,Package,Version`, one row per dependency.

use std::io::{self, Write};

use crate::types::DependencyRecord;

pub const HEADER: &str = "Source Path,Package,Version";

/// Quote a field if it contains commas, quotes, or newlines.
fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn write_ledger<W: Write>(deps: &[DependencyRecord], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{HEADER}")?;

    for dep in deps {
        writeln!(
            writer,
            "{},{},{}",
            escape_field(&dep.source.display().to_string()),
            escape_field(&dep.package),
            escape_field(&dep.version)
        )?;
    }

    Ok(())
}
