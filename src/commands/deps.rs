//! Deps command - build the dependency ledger for a project.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{Project, ProjectArgs};
use crate::config::ProjectConfig;
use crate::manifests::extract_project_dependencies;
use crate::report::{DependencyReport, LEDGER_FILE, LedgerFormat};

#[derive(Args)]
pub struct DepsCmd {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Where to write the ledger (default: <project>/all_dependencies_with_paths.csv)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Ledger format
    #[arg(long, value_enum, default_value_t = LedgerFormat::Csv)]
    pub format: LedgerFormat,

    /// Version recorded for dependencies found in import lines
    #[arg(long)]
    pub label: Option<String>,

    /// Number of files to scan concurrently
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,
}

impl DepsCmd {
    pub fn run(&self) -> Result<()> {
        let report = self.execute()?;
        info!(dependencies = report.records.len(), "ledger written");
        println!("{}", report.status_line());
        Ok(())
    }

    pub fn execute(&self) -> Result<DependencyReport> {
        let project = Project::open(&self.project)?;
        let root = project.root();
        let config = ProjectConfig::load(root)?.with_version_label(self.label.clone());

        let deps = super::with_jobs(self.jobs, || extract_project_dependencies(root, &config))??;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| project.output_dir().join(LEDGER_FILE));

        DependencyReport::write(output, deps, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_default_ledger() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("requirements.txt"), "flask==2.0.1\n").unwrap();
        fs::write(root.join("app.py"), "import numpy\n").unwrap();

        let cmd = DepsCmd {
            project: super::super::local_args(root),
            output: None,
            format: LedgerFormat::Csv,
            label: None,
            jobs: Some(2),
        };
        let report = cmd.execute().unwrap();

        assert_eq!(report.path, root.join(LEDGER_FILE));
        assert_eq!(report.records.len(), 2);

        let csv = fs::read_to_string(root.join(LEDGER_FILE)).unwrap();
        assert!(csv.contains(",flask,2.0.1\n"));
        assert!(csv.contains(",numpy,Python\n"));
    }

    #[test]
    fn test_label_override_and_config_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join(".depscan.toml"), "extra_stdlib = [\"numpy\"]\n").unwrap();
        fs::write(root.join("app.py"), "import numpy\nimport attrs\n").unwrap();

        let cmd = DepsCmd {
            project: super::super::local_args(root),
            output: Some(root.join("out.json")),
            format: LedgerFormat::Json,
            label: Some("3.12".to_string()),
            jobs: None,
        };
        let report = cmd.execute().unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].package, "attrs");
        assert_eq!(report.records[0].version, "3.12");
        assert!(root.join("out.json").exists());
    }

    #[test]
    fn test_git_url_is_cloned_then_scanned() {
        let git = |dir: &std::path::Path, args: &[&str]| {
            std::process::Command::new("git")
                .arg("-C")
                .arg(dir)
                .args(args)
                .status()
                .is_ok_and(|s| s.success())
        };

        let tmp = TempDir::new().unwrap();
        let origin = tmp.path().join("service");
        fs::create_dir_all(&origin).unwrap();
        if !git(&origin, &["init", "--quiet"]) {
            return;
        }
        fs::write(origin.join("requirements.txt"), "flask==2.0.1\n").unwrap();
        assert!(git(&origin, &["add", "."]));
        assert!(git(
            &origin,
            &[
                "-c",
                "user.name=t",
                "-c",
                "user.email=t@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "-m",
                "init",
            ],
        ));

        let clones = tmp.path().join("clones");
        let cmd = DepsCmd {
            project: ProjectArgs {
                target: format!("file://{}", origin.display()),
                clone_into: Some(clones.clone()),
                token: None,
            },
            output: None,
            format: LedgerFormat::Csv,
            label: None,
            jobs: None,
        };
        let report = cmd.execute().unwrap();

        let checkout = clones.join("service");
        assert_eq!(report.path, checkout.join(LEDGER_FILE));
        assert_eq!(
            report.records,
            vec![crate::types::DependencyRecord::new(
                &checkout.join("requirements.txt"),
                "flask",
                "2.0.1"
            )]
        );
    }
}
