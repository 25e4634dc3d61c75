//! Report sinks for the dependency ledger and the usage report.

pub mod csv;
pub mod json;
pub mod text;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::{DependencyRecord, UsageRecord};

pub const LEDGER_FILE: &str = "all_dependencies_with_paths.csv";
pub const USAGE_FILE: &str = "ast_report.txt";

/// Output format for the dependency ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LedgerFormat {
    #[default]
    Csv,
    Json,
}

/// Output format for the usage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UsageFormat {
    #[default]
    Text,
    Json,
}

/// A written dependency ledger.
#[derive(Debug)]
pub struct DependencyReport {
    pub path: PathBuf,
    pub records: Vec<DependencyRecord>,
}

impl DependencyReport {
    pub fn write(path: PathBuf, records: Vec<DependencyRecord>, format: LedgerFormat) -> Result<Self> {
        write_file(&path, |w| match format {
            LedgerFormat::Csv => csv::write_ledger(&records, w).map_err(Into::into),
            LedgerFormat::Json => json::write_json(&records, w),
        })?;
        Ok(Self { path, records })
    }

    pub fn status_line(&self) -> String {
        format!("Dependencies extracted and saved to {}", self.path.display())
    }
}

/// A written usage report.
#[derive(Debug)]
pub struct UsageReport {
    pub path: PathBuf,
    pub records: Vec<UsageRecord>,
}

impl UsageReport {
    pub fn write(path: PathBuf, records: Vec<UsageRecord>, format: UsageFormat) -> Result<Self> {
        write_file(&path, |w| match format {
            UsageFormat::Text => text::write_usage_report(&records, w).map_err(Into::into),
            UsageFormat::Json => json::write_json(&records, w),
        })?;
        Ok(Self { path, records })
    }

    pub fn status_line(&self) -> String {
        format!("AST usage report saved to: {}", self.path.display())
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }
}

fn write_file<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer).with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dependency_report_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/deps.csv");
        let records = vec![DependencyRecord::new(Path::new("requirements.txt"), "flask", "2.0.1")];

        let report = DependencyReport::write(path.clone(), records, LedgerFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Source Path,Package,Version\nrequirements.txt,flask,2.0.1\n");
        assert_eq!(
            report.status_line(),
            format!("Dependencies extracted and saved to {}", path.display())
        );
    }

    #[test]
    fn test_usage_report_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(USAGE_FILE);
        let records = vec![
            UsageRecord::import(Path::new("a.py"), "json", 1),
            UsageRecord::error(Path::new("b.py"), "invalid syntax at line 1, column 5"),
        ];

        let report = UsageReport::write(path.clone(), records, UsageFormat::Json).unwrap();
        assert_eq!(report.error_count(), 1);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }
}
