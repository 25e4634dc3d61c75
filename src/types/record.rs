use std::path::{Path, PathBuf};

use serde::Serialize;

/// Version placeholder used whenever an extractor could not determine one.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// One declared dependency: `(source, package, version)`.
///
/// `source` is the manifest or Python file that declared the package.
/// The same package may appear several times with different sources or
/// versions; the ledger does not enforce uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyRecord {
    pub source: PathBuf,
    pub package: String,
    pub version: String,
}

impl DependencyRecord {
    pub fn new(source: &Path, package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            source: source.to_path_buf(),
            package: package.into(),
            version: version.into(),
        }
    }

    /// Build a record from a `(package, version)` pair produced by the splitter.
    pub fn from_split(source: &Path, (package, version): (String, String)) -> Self {
        Self {
            source: source.to_path_buf(),
            package,
            version,
        }
    }
}

/// Kind of entry in the usage report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageCategory {
    /// `import x` / `from m import x`
    Import,
    /// `name.attribute` access
    Usage,
    /// File could not be read or parsed
    Error,
}

impl UsageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageCategory::Import => "import",
            UsageCategory::Usage => "usage",
            UsageCategory::Error => "error",
        }
    }

    /// Upper-case label used by the text report.
    pub fn label(&self) -> &'static str {
        match self {
            UsageCategory::Import => "IMPORT",
            UsageCategory::Usage => "USAGE",
            UsageCategory::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One import, attribute usage, or per-file failure found by the analyzer.
///
/// For `UsageCategory::Error` the `symbol` holds the failure message and
/// `line` is `-1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    pub file: PathBuf,
    pub category: UsageCategory,
    pub symbol: String,
    pub line: i64,
}

impl UsageRecord {
    pub fn import(file: &Path, symbol: impl Into<String>, line: i64) -> Self {
        Self {
            file: file.to_path_buf(),
            category: UsageCategory::Import,
            symbol: symbol.into(),
            line,
        }
    }

    pub fn usage(file: &Path, symbol: impl Into<String>, line: i64) -> Self {
        Self {
            file: file.to_path_buf(),
            category: UsageCategory::Usage,
            symbol: symbol.into(),
            line,
        }
    }

    pub fn error(file: &Path, message: impl Into<String>) -> Self {
        Self {
            file: file.to_path_buf(),
            category: UsageCategory::Error,
            symbol: message.into(),
            line: -1,
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == UsageCategory::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_record_uses_sentinel_line() {
        let rec = UsageRecord::error(Path::new("a.py"), "invalid syntax");
        assert!(rec.is_error());
        assert_eq!(rec.line, -1);
        assert_eq!(rec.symbol, "invalid syntax");
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(UsageCategory::Import.label(), "IMPORT");
        assert_eq!(UsageCategory::Usage.to_string(), "usage");
        assert_eq!(
            serde_json::to_string(&UsageCategory::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_from_split() {
        let rec = DependencyRecord::from_split(
            Path::new("requirements.txt"),
            ("flask".to_string(), "2.0.1".to_string()),
        );
        assert_eq!(rec, DependencyRecord::new(Path::new("requirements.txt"), "flask", "2.0.1"));
    }
}
