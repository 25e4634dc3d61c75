//! Analyzer error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("tree-sitter error: {0}")]
    TreeSitter(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{message} at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
