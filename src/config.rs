//! Per-project configuration.
//!
//! Read from `.depscan.toml` in the project root. Every key is optional:
//! - `exclude` - extra directory names to skip while walking
//! - `walk_all` - disable the built-in skip list
//! - `extra_stdlib` - module names treated as resolvable by the import scanner
//! - `version_label` - version column used for inline-import records

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = ".depscan.toml";

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Additional directory names to skip during walks.
    pub exclude: Vec<String>,

    /// Walk every directory, ignoring the built-in skip list.
    pub walk_all: bool,

    /// Extra module names to treat as part of the standard distribution.
    pub extra_stdlib: Vec<String>,

    /// Version recorded for dependencies inferred from `import` lines.
    pub version_label: String,
}

fn default_version_label() -> String {
    "Python".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            walk_all: false,
            extra_stdlib: Vec::new(),
            version_label: default_version_label(),
        }
    }
}

impl ProjectConfig {
    /// Load config from `.depscan.toml` in the given directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::config_path(dir);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Path of the config file for a project root.
    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Override the inline-import version label.
    pub fn with_version_label(mut self, label: Option<String>) -> Self {
        if let Some(label) = label {
            self.version_label = label;
        }
        self
    }
}
