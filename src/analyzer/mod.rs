//! Import and attribute-usage analysis using tree-sitter.
//!
//! This module provides:
//! - Python parsing with syntax-error detection
//! - A visitor that records imports and `name.attribute` usages
//! - A repository driver that turns per-file failures into error records

mod error;
mod python;

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{info, warn};

pub use error::AnalyzerError;
pub use python::{analyze_source, parse_python, string_literal, walk_tree};

use crate::config::ProjectConfig;
use crate::types::UsageRecord;
use crate::walk::{self, SkipList};

/// Extension of the files the analyzer and import scanner read.
pub const PYTHON_EXTENSION: &str = "py";

/// Analyze every Python file under `root`.
///
/// Files are parsed in parallel and reassembled in walk order. A file that
/// can't be read or parsed contributes exactly one error record; only an
/// unreadable root fails the whole run.
pub fn analyze_repo(root: &Path, config: &ProjectConfig) -> Result<Vec<UsageRecord>> {
    let skip = SkipList::from_config(config);
    let files = walk::source_files(root, PYTHON_EXTENSION, &skip)?;
    info!(root = %root.display(), files = files.len(), "analyzing imports and usages");

    let records: Vec<UsageRecord> = files
        .par_iter()
        .map(|file| analyze_file(file))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect();

    let errors = records.iter().filter(|r| r.is_error()).count();
    info!(records = records.len(), errors, "analysis complete");

    Ok(records)
}

fn analyze_file(file: &Path) -> Vec<UsageRecord> {
    match std::fs::read_to_string(file) {
        Ok(source) => {
            let records = analyze_source(file, &source);
            if let [record] = records.as_slice()
                && record.is_error()
            {
                warn!(path = %file.display(), error = %record.symbol, "failed to parse");
            }
            records
        }
        Err(e) => {
            let err = AnalyzerError::from(e);
            warn!(path = %file.display(), error = %err, "failed to read");
            vec![UsageRecord::error(file, err.to_string())]
        }
    }
}
