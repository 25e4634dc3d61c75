//! Conda environment descriptors (`environment.yml`).

use std::path::Path;

use serde_yaml::Value;

use super::specifier::split_dependency;
use super::{ManifestError, ManifestParser};
use crate::types::DependencyRecord;

pub struct CondaParser;

impl ManifestParser for CondaParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let env: Value = serde_yaml::from_str(&content).map_err(|e| ManifestError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(conda_deps(path, &env))
    }
}

/// Plain entries are conda specs; a `{pip: [...]}` entry nests pip specs.
fn conda_deps(path: &Path, env: &Value) -> Vec<DependencyRecord> {
    let Some(entries) = env.get("dependencies").and_then(|d| d.as_sequence()) else {
        return vec![];
    };

    let mut deps = Vec::new();
    for entry in entries {
        match entry {
            Value::String(spec) => {
                deps.push(DependencyRecord::from_split(path, split_dependency(spec)));
            }
            Value::Mapping(_) => {
                let pip = entry
                    .get("pip")
                    .and_then(|p| p.as_sequence())
                    .into_iter()
                    .flatten()
                    .filter_map(|s| s.as_str());
                for spec in pip {
                    deps.push(DependencyRecord::from_split(path, split_dependency(spec)));
                }
            }
            _ => {}
        }
    }
    deps
}
