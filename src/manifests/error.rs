//! Manifest parsing errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or interpret a single manifest.
///
/// These never abort a run: the aggregator logs them and moves on.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("syntax error in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    #[error("tree-sitter error: {0}")]
    TreeSitter(String),
}

impl ManifestError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ManifestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn toml(path: &std::path::Path, source: toml::de::Error) -> Self {
        ManifestError::Toml {
            path: path.to_path_buf(),
            source,
        }
    }
}
