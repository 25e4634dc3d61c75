//! setuptools scripts (`setup.py`).
//!
//! Parsed with tree-sitter; only literal `install_requires=[...]` lists passed
//! to `setup(...)` / `setuptools.setup(...)` are understood.

use std::path::Path;

use tree_sitter::Node;

use super::specifier::split_dependency;
use super::{ManifestError, ManifestParser};
use crate::analyzer::{AnalyzerError, parse_python, string_literal, walk_tree};
use crate::types::DependencyRecord;

pub struct SetupPyParser;

impl ManifestParser for SetupPyParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let source = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;

        let tree = parse_python(&source).map_err(|e| match e {
            AnalyzerError::Syntax { .. } => ManifestError::Syntax {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
            other => ManifestError::TreeSitter(other.to_string()),
        })?;

        let mut requires = Vec::new();
        collect_install_requires(tree.root_node(), &source, &mut requires);

        Ok(requires
            .iter()
            .map(|spec| DependencyRecord::from_split(path, split_dependency(spec)))
            .collect())
    }
}

fn collect_install_requires(root: Node, source: &str, out: &mut Vec<String>) {
    walk_tree(root, |node| {
        if node.kind() == "call"
            && is_setup_call(node, source)
            && let Some(args) = node.child_by_field_name("arguments")
        {
            let mut cursor = args.walk();
            for arg in args.named_children(&mut cursor) {
                if let Some(list) = install_requires_list(arg, source) {
                    let mut items = list.walk();
                    out.extend(
                        list.named_children(&mut items)
                            .filter_map(|item| string_literal(item, source)),
                    );
                }
            }
        }
        true
    });
}

/// `setup(...)` or `<module>.setup(...)`.
fn is_setup_call(call: Node, source: &str) -> bool {
    let Some(function) = call.child_by_field_name("function") else {
        return false;
    };

    let name = match function.kind() {
        "identifier" => Some(function),
        "attribute" => function.child_by_field_name("attribute"),
        _ => None,
    };

    name.and_then(|n| n.utf8_text(source.as_bytes()).ok()) == Some("setup")
}

fn install_requires_list<'t>(arg: Node<'t>, source: &str) -> Option<Node<'t>> {
    if arg.kind() != "keyword_argument" {
        return None;
    }

    let name = arg.child_by_field_name("name")?;
    if name.utf8_text(source.as_bytes()).ok()? != "install_requires" {
        return None;
    }

    let value = arg.child_by_field_name("value")?;
    (value.kind() == "list").then_some(value)
}
