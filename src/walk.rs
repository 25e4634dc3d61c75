//! Deterministic project tree traversal.
//!
//! Both walks visit a directory's files before its sub-directories and sort
//! entries by name, so repeated runs over an unchanged tree see the same order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ProjectConfig;

/// Directories skipped unless `walk_all` is set.
const SKIP_DIRS: &[&str] = &[
    // VCS
    ".git",
    ".svn",
    ".hg",
    // Caches
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".ruff_cache",
    ".tox",
    ".nox",
    ".cache",
    // Virtual envs
    ".venv",
    "venv",
    // Build artifacts
    "build",
    "dist",
    ".eggs",
    "node_modules",
    // IDE
    ".idea",
    ".vscode",
];

/// Directory names to leave out of a walk.
#[derive(Debug, Clone, Default)]
pub struct SkipList {
    builtin: bool,
    extra: HashSet<String>,
}

impl SkipList {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            builtin: !config.walk_all,
            extra: config.exclude.iter().cloned().collect(),
        }
    }

    /// A skip list that skips nothing.
    #[cfg(test)]
    pub fn none() -> Self {
        Self::default()
    }

    pub fn should_skip(&self, name: &str) -> bool {
        if self.builtin && SKIP_DIRS.contains(&name) {
            return true;
        }
        self.extra.contains(name)
    }
}

/// Find the first file named `filename` under `root`.
///
/// Each directory is checked before any of its sub-directories; returns on
/// the first hit.
pub fn find_first(root: &Path, filename: &str, skip: &SkipList) -> Option<PathBuf> {
    let candidate = root.join(filename);
    if candidate.is_file() {
        return Some(candidate);
    }

    for dir in sorted_subdirs(root, skip) {
        if let Some(found) = find_first(&dir, filename, skip) {
            return Some(found);
        }
    }

    None
}

/// List every file under `root` whose extension is `extension`.
///
/// An unreadable root is an error; unreadable sub-directories are skipped.
pub fn source_files(root: &Path, extension: &str, skip: &SkipList) -> Result<Vec<PathBuf>> {
    std::fs::read_dir(root)
        .with_context(|| format!("Failed to read project directory {}", root.display()))?;

    let mut files = Vec::new();
    collect_files(root, extension, skip, &mut files);
    Ok(files)
}

fn collect_files(dir: &Path, extension: &str, skip: &SkipList, found: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            debug!(path = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in entries.flatten() {
        let path = entry.path();
        if is_real_dir(&entry) {
            let skipped = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| skip.should_skip(n));
            if !skipped {
                dirs.push(path);
            }
        } else if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort();
    dirs.sort();

    found.extend(files);
    for sub in dirs {
        collect_files(&sub, extension, skip, found);
    }
}

/// Directory entries that are directories themselves; symlinks are not followed.
fn is_real_dir(entry: &std::fs::DirEntry) -> bool {
    entry.file_type().is_ok_and(|t| t.is_dir())
}

fn sorted_subdirs(dir: &Path, skip: &SkipList) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return vec![],
    };

    let mut dirs: Vec<_> = entries
        .flatten()
        .filter(is_real_dir)
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !skip.should_skip(n))
        })
        .collect();
    dirs.sort();
    dirs
}
