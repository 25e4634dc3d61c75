//! Poetry lock files (`poetry.lock`).
//!
//! Versions are already resolved, so they are taken verbatim.

use std::path::Path;

use super::{ManifestError, ManifestParser, read_toml};
use crate::types::{DependencyRecord, UNKNOWN_VERSION};

pub struct PoetryLockParser;

impl ManifestParser for PoetryLockParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let Some(lock) = read_toml(path)? else {
            return Ok(vec![]);
        };
        Ok(lock_packages(path, &lock))
    }
}

fn lock_packages(path: &Path, lock: &toml::Value) -> Vec<DependencyRecord> {
    let Some(packages) = lock.get("package").and_then(|p| p.as_array()) else {
        return vec![];
    };

    packages
        .iter()
        .map(|pkg| {
            let name = pkg.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let version = pkg
                .get("version")
                .and_then(|v| v.as_str())
                .unwrap_or(UNKNOWN_VERSION);
            DependencyRecord::new(path, name, version)
        })
        .collect()
}
