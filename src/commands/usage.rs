//! Usage command - report imports and attribute usages per file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{Project, ProjectArgs};
use crate::analyzer::analyze_repo;
use crate::config::ProjectConfig;
use crate::report::{USAGE_FILE, UsageFormat, UsageReport};

#[derive(Args)]
pub struct UsageCmd {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Where to write the report (default: <project>/ast_report.txt)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = UsageFormat::Text)]
    pub format: UsageFormat,

    /// Number of files to parse concurrently
    #[arg(long, short = 'j')]
    pub jobs: Option<usize>,
}

impl UsageCmd {
    pub fn run(&self) -> Result<()> {
        info!(project = %self.project.target, "scanning project");
        let report = self.execute()?;
        if report.error_count() > 0 {
            eprintln!("{} file(s) could not be parsed", report.error_count());
        }
        println!("{}", report.status_line());
        Ok(())
    }

    pub fn execute(&self) -> Result<UsageReport> {
        let project = Project::open(&self.project)?;
        let root = project.root();
        let config = ProjectConfig::load(root)?;
        let records = super::with_jobs(self.jobs, || analyze_repo(root, &config))??;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| project.output_dir().join(USAGE_FILE));

        UsageReport::write(output, records, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_writes_text_report() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::write(root.join("app.py"), "import json\nx = obj.method()\n").unwrap();
        fs::write(root.join("broken.py"), "def f(:\n").unwrap();

        let cmd = UsageCmd {
            project: super::super::local_args(root),
            output: None,
            format: UsageFormat::Text,
            jobs: Some(1),
        };
        let report = cmd.execute().unwrap();
        assert_eq!(report.error_count(), 1);

        let text = fs::read_to_string(root.join(USAGE_FILE)).unwrap();
        let app = root.join("app.py");
        assert!(text.contains(&format!("{} | IMPORT | json | Line: 1", app.display())));
        assert!(text.contains(&format!("{} | USAGE | obj.method | Line: 2", app.display())));
        assert!(text.contains("| ERROR |"));
        assert!(text.contains("| Line: -1"));
    }
}
