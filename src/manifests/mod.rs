//! Manifest file parsing for dependency extraction.

mod aggregate;
mod conda;
mod error;
mod pipfile;
mod poetry_lock;
mod pyproject;
mod requirements;
mod setup_py;
pub mod specifier;

use std::path::Path;

pub use aggregate::extract_project_dependencies;
pub use conda::CondaParser;
pub use error::ManifestError;
pub use pipfile::PipfileParser;
pub use poetry_lock::PoetryLockParser;
pub use pyproject::PyprojectParser;
pub use requirements::RequirementsParser;
pub use setup_py::SetupPyParser;

use crate::types::DependencyRecord;
use specifier::join_constraint;

/// Reads one manifest file into dependency records.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError>;
}

/// Manifest formats, in the order the aggregator visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    Pyproject,
    PoetryLock,
    Pipfile,
    Conda,
    Requirements,
    SetupPy,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 6] = [
        ManifestKind::Pyproject,
        ManifestKind::PoetryLock,
        ManifestKind::Pipfile,
        ManifestKind::Conda,
        ManifestKind::Requirements,
        ManifestKind::SetupPy,
    ];

    /// Exact filename this format is discovered by.
    pub fn filename(&self) -> &'static str {
        match self {
            ManifestKind::Pyproject => "pyproject.toml",
            ManifestKind::PoetryLock => "poetry.lock",
            ManifestKind::Pipfile => "Pipfile",
            ManifestKind::Conda => "environment.yml",
            ManifestKind::Requirements => "requirements.txt",
            ManifestKind::SetupPy => "setup.py",
        }
    }

    pub fn parser(&self) -> &'static dyn ManifestParser {
        match self {
            ManifestKind::Pyproject => &PyprojectParser,
            ManifestKind::PoetryLock => &PoetryLockParser,
            ManifestKind::Pipfile => &PipfileParser,
            ManifestKind::Conda => &CondaParser,
            ManifestKind::Requirements => &RequirementsParser,
            ManifestKind::SetupPy => &SetupPyParser,
        }
    }
}

/// Read a TOML manifest. Whitespace-only files yield `None`.
fn read_toml(path: &Path) -> Result<Option<toml::Value>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    let table: toml::Table = toml::from_str(&content).map_err(|e| ManifestError::toml(path, e))?;
    Ok(Some(toml::Value::Table(table)))
}

/// Specifiers from `name = "constraint"` / `name = { version = ".." }` tables,
/// section by section.
fn table_specifiers<'a>(
    value: &'a toml::Value,
    sections: &'a [&'a str],
) -> impl Iterator<Item = String> + 'a {
    sections
        .iter()
        .filter_map(move |section| value.get(*section).and_then(|t| t.as_table()))
        .flat_map(|table| {
            table
                .iter()
                .map(|(name, entry)| join_constraint(name, table_constraint(entry)))
        })
}

fn table_constraint(entry: &toml::Value) -> &str {
    match entry {
        toml::Value::String(v) => v,
        toml::Value::Table(t) => t.get("version").and_then(|v| v.as_str()).unwrap_or(""),
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_filenames_are_distinct() {
        let names: std::collections::HashSet<_> =
            ManifestKind::ALL.iter().map(|k| k.filename()).collect();
        assert_eq!(names.len(), ManifestKind::ALL.len());
        assert_eq!(ManifestKind::ALL[0].filename(), "pyproject.toml");
        assert_eq!(ManifestKind::ALL[5].filename(), "setup.py");
    }

    #[test]
    fn test_table_specifiers() {
        let value: toml::Value = toml::from_str(
            r#"
[packages]
a = "*"
b = { version = "~=1.4" }
c = { git = "https://example.com/c.git" }

[dev-packages]
d = "3.0"
"#,
        )
        .unwrap();

        let specs: Vec<_> = table_specifiers(&value, &["packages", "dev-packages", "missing"]).collect();
        assert_eq!(specs, vec!["a", "b~=1.4", "c", "d==3.0"]);
    }
}
