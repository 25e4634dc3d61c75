//! Python syntax trees: parsing, the usage visitor, and per-file analysis.

use std::path::Path;

use tree_sitter::{Node, Parser, Tree};

use super::error::AnalyzerError;
use crate::types::{UsageCategory, UsageRecord};

fn create_parser() -> Result<Parser, AnalyzerError> {
    let mut parser = Parser::new();
    let language = tree_sitter_python::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| AnalyzerError::TreeSitter(e.to_string()))?;
    Ok(parser)
}

/// Parse Python source, rejecting trees that contain ERROR or MISSING nodes.
///
/// tree-sitter always produces a tree; a file only counts as parsed when
/// the grammar accepted all of it.
pub fn parse_python(source: &str) -> Result<Tree, AnalyzerError> {
    let mut parser = create_parser()?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| AnalyzerError::Parse("failed to parse Python source".into()))?;

    if let Some(bad) = first_syntax_error(tree.root_node()) {
        let pos = bad.start_position();
        let message = if bad.is_missing() {
            format!("missing `{}`", bad.kind())
        } else if LEGACY_STATEMENTS.contains(&bad.kind()) {
            format!("invalid syntax (Python 2 `{}`)", bad.kind().trim_end_matches("_statement"))
        } else {
            "invalid syntax".to_string()
        };
        return Err(AnalyzerError::Syntax {
            line: pos.row + 1,
            column: pos.column + 1,
            message,
        });
    }

    Ok(tree)
}

/// Statements the grammar still accepts but Python 3 rejects.
const LEGACY_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

fn first_syntax_error(root: Node) -> Option<Node> {
    let mut found = None;
    walk_tree(root, |node| {
        if found.is_some() {
            return false;
        }
        if node.is_error() || node.is_missing() || LEGACY_STATEMENTS.contains(&node.kind()) {
            found = Some(node);
            return false;
        }
        true
    });
    found
}

/// Pre-order walk driven by a `TreeCursor`, so tree depth costs no call stack.
///
/// `visit` returns whether to descend into the node's children.
pub fn walk_tree<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut cursor = root.walk();
    loop {
        if visit(cursor.node()) && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Contents of a plain (non-bytes, non-f) string literal.
pub fn string_literal(node: Node, source: &str) -> Option<String> {
    if node.kind() != "string" {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    if children.iter().any(|c| c.kind() == "interpolation") {
        return None;
    }

    let start = children.first().filter(|c| c.kind() == "string_start")?;
    let end = children.last().filter(|c| c.kind() == "string_end")?;

    let prefix = start.utf8_text(source.as_bytes()).ok()?;
    if prefix.contains(['b', 'B', 'f', 'F']) {
        return None;
    }

    source
        .get(start.end_byte()..end.start_byte())
        .map(str::to_string)
}

/// Something the visitor found, before it is tied to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    pub category: UsageCategory,
    pub symbol: String,
    pub line: i64,
}

/// Collects imports and `name.attribute` usages from a Python syntax tree.
///
/// Records:
/// - `import a.b as c` -> `a.b`
/// - `from m import x` -> `m.x` (`from . import x` -> `.x`)
/// - `obj.attr` where `obj` is a bare name -> `obj.attr`
///
/// Nodes are visited once, in pre-order, so nested imports inside
/// functions and classes are included and entries come out in source order.
pub struct UsageVisitor<'s> {
    source: &'s str,
    entries: Vec<UsageEntry>,
}

impl<'s> UsageVisitor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            entries: Vec::new(),
        }
    }

    /// Parse `source` and visit the whole tree.
    pub fn collect(source: &'s str) -> Result<Vec<UsageEntry>, AnalyzerError> {
        let tree = parse_python(source)?;
        let mut visitor = Self::new(source);
        visitor.visit(tree.root_node());
        Ok(visitor.entries)
    }

    pub fn visit(&mut self, root: Node) {
        walk_tree(root, |node| {
            match node.kind() {
                "import_statement" => self.visit_import(node),
                "import_from_statement" => self.visit_import_from(node),
                "future_import_statement" => self.visit_future_import(node),
                // Calls are covered through their `attribute` callee.
                "attribute" => self.visit_attribute(node),
                _ => {}
            }
            true
        });
    }

    fn visit_import(&mut self, node: Node) {
        let line = line_of(node);
        for name in self.imported_names(node) {
            self.push(UsageCategory::Import, name, line);
        }
    }

    fn visit_import_from(&mut self, node: Node) {
        let line = line_of(node);
        let module = node
            .child_by_field_name("module_name")
            .and_then(|m| self.text(m))
            .unwrap_or_default();

        let mut names = self.imported_names(node);
        if has_child_kind(node, "wildcard_import") {
            names.push("*".to_string());
        }

        for name in names {
            self.push(UsageCategory::Import, qualify(&module, &name), line);
        }
    }

    fn visit_future_import(&mut self, node: Node) {
        let line = line_of(node);
        for name in self.imported_names(node) {
            self.push(UsageCategory::Import, qualify("__future__", &name), line);
        }
    }

    fn visit_attribute(&mut self, node: Node) {
        let Some(object) = node.child_by_field_name("object") else {
            return;
        };
        if object.kind() != "identifier" {
            return;
        }

        let object = self.text(object);
        let attribute = node
            .child_by_field_name("attribute")
            .and_then(|a| self.text(a));

        if let (Some(object), Some(attribute)) = (object, attribute) {
            self.push(
                UsageCategory::Usage,
                format!("{object}.{attribute}"),
                line_of(node),
            );
        }
    }

    /// Module names from the `name` fields, with aliases dropped.
    fn imported_names(&self, node: Node) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .filter_map(|n| {
                let target = if n.kind() == "aliased_import" {
                    n.child_by_field_name("name")?
                } else {
                    n
                };
                self.text(target)
            })
            .collect()
    }

    fn text(&self, node: Node) -> Option<String> {
        node.utf8_text(self.source.as_bytes())
            .ok()
            .map(|s| s.to_string())
    }

    fn push(&mut self, category: UsageCategory, symbol: String, line: i64) {
        self.entries.push(UsageEntry {
            category,
            symbol,
            line,
        });
    }
}

fn line_of(node: Node) -> i64 {
    node.start_position().row as i64 + 1
}

fn has_child_kind(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == kind)
}

/// `module` + `name`; relative prefixes like `.` or `..` attach directly.
fn qualify(module: &str, name: &str) -> String {
    if module.is_empty() || module.ends_with('.') {
        format!("{module}{name}")
    } else {
        format!("{module}.{name}")
    }
}

/// Analyze one file's source. A parse failure becomes a single error record.
pub fn analyze_source(file: &Path, source: &str) -> Vec<UsageRecord> {
    match UsageVisitor::collect(source) {
        Ok(entries) => entries
            .into_iter()
            .map(|e| match e.category {
                UsageCategory::Import => UsageRecord::import(file, e.symbol, e.line),
                UsageCategory::Usage => UsageRecord::usage(file, e.symbol, e.line),
                UsageCategory::Error => UsageRecord::error(file, e.symbol),
            })
            .collect(),
        Err(e) => vec![UsageRecord::error(file, e.to_string())],
    }
}
