//! Config command - show the effective project configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::ProjectConfig;

#[derive(Args)]
pub struct ConfigCmd {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl ConfigCmd {
    pub fn run(&self) -> Result<()> {
        let path = ProjectConfig::config_path(&self.path);
        let config = ProjectConfig::load(&self.path)?;

        if path.exists() {
            println!("Config: {}", path.display());
        } else {
            println!("Config: {} (not found, using defaults)", path.display());
        }
        println!();
        println!("exclude:        {:?}", config.exclude);
        println!("walk_all:       {}", config.walk_all);
        println!("extra_stdlib:   {:?}", config.extra_stdlib);
        println!("version_label:  {}", config.version_label);
        Ok(())
    }
}
