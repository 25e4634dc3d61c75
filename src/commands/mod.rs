//! CLI command implementations.

mod config;
mod deps;
mod usage;

pub use config::ConfigCmd;
pub use deps::DepsCmd;
pub use usage::UsageCmd;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use secrecy::SecretString;

use crate::remote::{self, Checkout};

/// Where a command finds the project: a local directory or a git URL.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project root or git URL to scan (default: current directory)
    #[arg(default_value = ".")]
    pub target: String,

    /// Keep the clone of a git URL under this directory instead of a temp dir
    #[arg(long)]
    pub clone_into: Option<PathBuf>,

    /// Token used to clone private GitHub repositories over HTTPS
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// A project tree ready to scan. Holding a temporary clone keeps it alive.
enum Project {
    Local(PathBuf),
    Remote(Checkout),
}

impl Project {
    fn open(args: &ProjectArgs) -> Result<Self> {
        if !remote::is_remote(&args.target) {
            return Ok(Project::Local(PathBuf::from(&args.target)));
        }

        let token = args.token.clone().map(SecretString::from);
        let checkout = remote::clone_repo(&args.target, args.clone_into.as_deref(), token.as_ref())?;
        Ok(Project::Remote(checkout))
    }

    fn root(&self) -> &Path {
        match self {
            Project::Local(path) => path,
            Project::Remote(checkout) => checkout.root(),
        }
    }

    /// Default directory for reports. A temporary clone is gone after the
    /// run, so its reports go to the working directory instead.
    fn output_dir(&self) -> PathBuf {
        match self {
            Project::Remote(checkout) if checkout.is_temporary() => PathBuf::from("."),
            _ => self.root().to_path_buf(),
        }
    }
}

/// Run `f` on a rayon pool with `jobs` threads, or the global pool if unset.
fn with_jobs<T: Send>(jobs: Option<usize>, f: impl FnOnce() -> T + Send) -> Result<T> {
    match jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .build()
                .context("Failed to build worker pool")?;
            Ok(pool.install(f))
        }
        None => Ok(f()),
    }
}

#[cfg(test)]
pub(crate) fn local_args(path: &Path) -> ProjectArgs {
    ProjectArgs {
        target: path.display().to_string(),
        clone_into: None,
        token: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_project() {
        let tmp = TempDir::new().unwrap();
        let project = Project::open(&local_args(tmp.path())).unwrap();
        assert_eq!(project.root(), tmp.path());
        assert_eq!(project.output_dir(), tmp.path());
    }

    #[test]
    fn test_unclonable_remote_is_error() {
        let tmp = TempDir::new().unwrap();
        let args = ProjectArgs {
            target: format!("file://{}", tmp.path().join("none.git").display()),
            clone_into: None,
            token: None,
        };
        assert!(Project::open(&args).is_err());
    }
}
