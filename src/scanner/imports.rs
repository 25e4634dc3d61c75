//! Line-based import scanning.
//!
//! Cheaper and more forgiving than a full parse: a file with syntax errors
//! still contributes its `import` lines.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use tracing::warn;

use super::probe::ModuleProbe;
use crate::types::DependencyRecord;

static IMPORT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:import|from)\s+([\w.]+)").unwrap());

/// Top-level module named by an `import x.y` / `from x.y import z` line.
///
/// Relative imports (`from . import x`) have no top-level module and yield `None`.
pub fn top_level_import(line: &str) -> Option<&str> {
    let caps = IMPORT_LINE.captures(line)?;
    let module = caps.get(1)?.as_str().split('.').next()?;
    (!module.is_empty()).then_some(module)
}

/// Third-party modules imported by `files`, one record per distinct
/// `(file, module, label)`.
///
/// Records keep walk order, then line order. Unreadable files are logged and
/// skipped.
pub fn scan_inline_imports(
    files: &[PathBuf],
    probe: &ModuleProbe,
    version_label: &str,
) -> Vec<DependencyRecord> {
    let per_file: Vec<Vec<DependencyRecord>> = files
        .par_iter()
        .map(|file| scan_file(file, probe, version_label))
        .collect();

    let mut seen = HashSet::new();
    per_file
        .into_iter()
        .flatten()
        .filter(|rec| seen.insert(rec.clone()))
        .collect()
}

fn scan_file(file: &Path, probe: &ModuleProbe, version_label: &str) -> Vec<DependencyRecord> {
    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %file.display(), error = %e, "failed to read source file");
            return vec![];
        }
    };

    content
        .lines()
        .filter_map(top_level_import)
        .filter(|module| !probe.is_resolvable(module))
        .map(|module| DependencyRecord::new(file, module, version_label))
        .collect()
}
