//! Dependency ledger: every manifest format plus inline imports.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::{ManifestKind, ManifestParser};
use crate::analyzer::PYTHON_EXTENSION;
use crate::config::ProjectConfig;
use crate::scanner::{ModuleProbe, scan_inline_imports};
use crate::types::DependencyRecord;
use crate::walk::{self, SkipList};

/// Extract the dependency ledger for a project.
///
/// Manifests come first, in `ManifestKind::ALL` order (first file of each
/// name found in the tree), followed by inline-import records. A manifest
/// that fails to parse is logged and contributes nothing.
pub fn extract_project_dependencies(
    root: &Path,
    config: &ProjectConfig,
) -> Result<Vec<DependencyRecord>> {
    let parsers: Vec<_> = ManifestKind::ALL
        .iter()
        .map(|kind| (*kind, kind.parser()))
        .collect();

    extract_with_parsers(root, config, &parsers)
}

fn extract_with_parsers(
    root: &Path,
    config: &ProjectConfig,
    parsers: &[(ManifestKind, &dyn ManifestParser)],
) -> Result<Vec<DependencyRecord>> {
    let skip = SkipList::from_config(config);
    let files = walk::source_files(root, PYTHON_EXTENSION, &skip)
        .with_context(|| format!("Invalid project root {}", root.display()))?;

    info!(root = %root.display(), "extracting dependencies");

    let mut all_deps = Vec::new();

    for (kind, parser) in parsers {
        let Some(path) = walk::find_first(root, kind.filename(), &skip) else {
            continue;
        };
        debug!(manifest = kind.filename(), path = %path.display(), "found manifest");

        match parser.parse(&path) {
            Ok(deps) => {
                debug!(path = %path.display(), count = deps.len(), "parsed manifest");
                all_deps.extend(deps);
            }
            Err(e) => warn!(manifest = kind.filename(), error = %e, "skipping manifest"),
        }
    }

    let probe = ModuleProbe::for_project(root, config);
    let inline = scan_inline_imports(&files, &probe, &config.version_label);
    debug!(count = inline.len(), "inline imports");
    all_deps.extend(inline);

    info!(dependencies = all_deps.len(), "extraction complete");
    Ok(all_deps)
}
