//! Paginated plain-text usage report.
//!
//! One line per record: `<file> | IMPORT|USAGE|ERROR | <symbol> | Line: <n>`.
//! A form feed and a page header separate every `LINES_PER_PAGE` records.

use std::io::{self, Write};

use crate::types::UsageRecord;

pub const TITLE: &str = "Python Import and Usage Report";
pub const LINES_PER_PAGE: usize = 50;

pub fn format_record(record: &UsageRecord) -> String {
    format!(
        "{} | {} | {} | Line: {}",
        record.file.display(),
        record.category.label(),
        record.symbol,
        record.line
    )
}

pub fn write_usage_report<W: Write>(records: &[UsageRecord], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{TITLE}")?;
    writeln!(writer)?;

    for (page, chunk) in records.chunks(LINES_PER_PAGE).enumerate() {
        if page > 0 {
            write!(writer, "\x0c")?;
            writeln!(writer, "Page {}", page + 1)?;
            writeln!(writer)?;
        }
        for record in chunk {
            writeln!(writer, "{}", format_record(record))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_record() {
        let file = Path::new("src/app.py");
        assert_eq!(
            format_record(&UsageRecord::import(file, "json", 1)),
            "src/app.py | IMPORT | json | Line: 1"
        );
        assert_eq!(
            format_record(&UsageRecord::usage(file, "obj.method", 2)),
            "src/app.py | USAGE | obj.method | Line: 2"
        );
        assert_eq!(
            format_record(&UsageRecord::error(file, "invalid syntax at line 3, column 1")),
            "src/app.py | ERROR | invalid syntax at line 3, column 1 | Line: -1"
        );
    }

    #[test]
    fn test_pagination() {
        let file = Path::new("a.py");
        let records: Vec<_> = (1..=(LINES_PER_PAGE as i64 + 1))
            .map(|line| UsageRecord::usage(file, "x.y", line))
            .collect();

        let mut out = Vec::new();
        write_usage_report(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(TITLE));
        assert_eq!(text.matches('\x0c').count(), 1);
        assert!(text.contains("\x0cPage 2\n"));
        assert_eq!(text.matches(" | USAGE | ").count(), records.len());
    }
}
