//! Remote repositories: clone a git URL so it can be scanned like a local tree.
//!
//! Clones go either into a caller-chosen directory (kept, and reused when the
//! checkout already exists) or into a temporary directory removed on drop.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use secrecy::{ExposeSecret, SecretString};
use tempfile::TempDir;
use tracing::{debug, info};

const URL_PREFIXES: &[&str] = &["https://", "http://", "ssh://", "git://", "file://", "git@"];

/// Whether `target` names a git remote rather than a local path.
pub fn is_remote(target: &str) -> bool {
    URL_PREFIXES.iter().any(|p| target.starts_with(p))
}

/// Repository name from a clone URL: the last path segment without `.git`.
pub fn repo_name(url: &str) -> Option<&str> {
    let name = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()?
        .trim_end_matches(".git");
    (!name.is_empty()).then_some(name)
}

/// A cloned repository. A temporary checkout is deleted when this is dropped.
#[derive(Debug)]
pub struct Checkout {
    root: PathBuf,
    temp: Option<TempDir>,
}

impl Checkout {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}

/// Clone `url`, authenticating GitHub HTTPS URLs with `token` when given.
///
/// With `into`, the checkout lands in `<into>/<repo name>`; an existing
/// checkout there is reused as is.
pub fn clone_repo(url: &str, into: Option<&Path>, token: Option<&SecretString>) -> Result<Checkout> {
    let name = repo_name(url).with_context(|| format!("Cannot derive a repository name from {url}"))?;

    let (parent, temp) = match into {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            (dir.to_path_buf(), None)
        }
        None => {
            let temp = TempDir::new().context("Failed to create temporary directory")?;
            (temp.path().to_path_buf(), Some(temp))
        }
    };

    let root = parent.join(name);
    if root.exists() {
        info!(path = %root.display(), "repository already cloned");
        return Ok(Checkout { root, temp });
    }

    info!(url, path = %root.display(), "cloning repository");
    let clone_url = authenticated_url(url, token);
    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--quiet"])
        .arg(clone_url.expose_secret())
        .arg(&root)
        .output()
        .context("Failed to run git")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone of {url} failed: {}", redact(stderr.trim(), token));
    }

    debug!(path = %root.display(), "clone complete");
    Ok(Checkout { root, temp })
}

/// `https://github.com/...` with the token as credentials; other URLs unchanged.
fn authenticated_url(url: &str, token: Option<&SecretString>) -> SecretString {
    match (url.strip_prefix("https://github.com/"), token) {
        (Some(rest), Some(token)) => {
            SecretString::from(format!("https://{}@github.com/{rest}", token.expose_secret()))
        }
        _ => SecretString::from(url.to_string()),
    }
}

fn redact(message: &str, token: Option<&SecretString>) -> String {
    match token {
        Some(token) if !token.expose_secret().is_empty() => {
            message.replace(token.expose_secret(), "***")
        }
        _ => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn run_git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    fn origin_repo(tmp: &TempDir) -> PathBuf {
        let origin = tmp.path().join("demo.git");
        fs::create_dir_all(&origin).unwrap();
        run_git(&origin, &["init", "--quiet"]);
        fs::write(origin.join("requirements.txt"), "flask==2.0.1\n").unwrap();
        fs::write(origin.join("app.py"), "import numpy\n").unwrap();
        run_git(&origin, &["add", "."]);
        run_git(
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
        );
        origin
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://github.com/pallets/flask.git"));
        assert!(is_remote("git@github.com:pallets/flask.git"));
        assert!(is_remote("file:///srv/repos/demo"));
        assert!(!is_remote("."));
        assert!(!is_remote("/home/me/project"));
    }

    #[test]
    fn test_repo_name() {
        assert_eq!(repo_name("https://github.com/pallets/flask.git"), Some("flask"));
        assert_eq!(repo_name("https://github.com/pallets/flask/"), Some("flask"));
        assert_eq!(repo_name("git@github.com:psf/requests.git"), Some("requests"));
        assert_eq!(repo_name("https://"), None);
    }

    #[test]
    fn test_token_only_for_github_https() {
        let token = SecretString::from("s3cret".to_string());

        let url = authenticated_url("https://github.com/acme/private.git", Some(&token));
        assert_eq!(url.expose_secret(), "https://s3cret@github.com/acme/private.git");

        let url = authenticated_url("https://gitlab.com/acme/x.git", Some(&token));
        assert_eq!(url.expose_secret(), "https://gitlab.com/acme/x.git");

        let url = authenticated_url("https://github.com/acme/public.git", None);
        assert_eq!(url.expose_secret(), "https://github.com/acme/public.git");
    }

    #[test]
    fn test_redact() {
        let token = SecretString::from("s3cret".to_string());
        assert_eq!(
            redact("fatal: https://s3cret@github.com/x denied", Some(&token)),
            "fatal: https://***@github.com/x denied"
        );
        assert_eq!(redact("fatal", None), "fatal");
    }

    #[test]
    fn test_clone_into_temp_and_kept_dirs() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let url = format!("file://{}", origin_repo(&tmp).display());

        let checkout = clone_repo(&url, None, None).unwrap();
        assert!(checkout.is_temporary());
        assert!(checkout.root().join("requirements.txt").is_file());
        let temp_root = checkout.root().to_path_buf();
        drop(checkout);
        assert!(!temp_root.exists());

        let dest = tmp.path().join("clones");
        let kept = clone_repo(&url, Some(&dest), None).unwrap();
        assert!(!kept.is_temporary());
        assert_eq!(kept.root(), dest.join("demo"));

        // Second call reuses the existing checkout.
        fs::write(kept.root().join("marker"), "").unwrap();
        let again = clone_repo(&url, Some(&dest), None).unwrap();
        assert!(again.root().join("marker").exists());
    }

    #[test]
    fn test_clone_failure_is_error() {
        if !git_available() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let url = format!("file://{}", tmp.path().join("missing.git").display());
        assert!(clone_repo(&url, None, None).is_err());
    }
}
