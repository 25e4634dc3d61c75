//! Python project metadata (`pyproject.toml`).
//!
//! `[tool.poetry]` wins when present; otherwise PEP 621
//! `[project] dependencies` is used. Never both.

use std::path::Path;

use toml::Value;

use super::specifier::split_dependency;
use super::{ManifestError, ManifestParser, read_toml, table_specifiers};
use crate::types::DependencyRecord;

pub struct PyprojectParser;

impl ManifestParser for PyprojectParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let Some(pyproject) = read_toml(path)? else {
            return Ok(vec![]);
        };
        Ok(pyproject_deps(path, &pyproject))
    }
}

fn pyproject_deps(path: &Path, pyproject: &Value) -> Vec<DependencyRecord> {
    if let Some(poetry) = pyproject.get("tool").and_then(|t| t.get("poetry")) {
        return table_specifiers(poetry, &["dependencies", "dev-dependencies"])
            .map(|spec| DependencyRecord::from_split(path, split_dependency(&spec)))
            .collect();
    }

    let Some(project_deps) = pyproject
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(|d| d.as_array())
    else {
        return vec![];
    };

    project_deps
        .iter()
        .filter_map(|dep| dep.as_str())
        .map(|spec| DependencyRecord::from_split(path, split_dependency(spec)))
        .collect()
}
