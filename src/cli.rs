//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{ConfigCmd, DepsCmd, UsageCmd};

#[derive(Parser)]
#[command(name = "depscan")]
#[command(about = "depscan - dependency ledger and usage report for Python projects")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Collect declared and imported dependencies into a ledger
    Deps(DepsCmd),

    /// Report imports and attribute usages for every Python file
    Usage(UsageCmd),

    /// Show the effective project configuration
    Config(ConfigCmd),
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Command::Deps(cmd) => cmd.run(),
            Command::Usage(cmd) => cmd.run(),
            Command::Config(cmd) => cmd.run(),
        }
    }
}
