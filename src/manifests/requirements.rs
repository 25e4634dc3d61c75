//! Plain requirement lists (`requirements.txt`).

use std::path::Path;

use super::{ManifestError, ManifestParser};
use crate::types::{DependencyRecord, UNKNOWN_VERSION};

pub struct RequirementsParser;

impl ManifestParser for RequirementsParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))?;
        Ok(parse_requirements(path, &content))
    }
}

/// One record per non-comment line: the name before the first `==` and the
/// version between the first and second.
pub fn parse_requirements(path: &Path, content: &str) -> Vec<DependencyRecord> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|line| {
            let mut parts = line.split("==");
            let name = parts.next().unwrap_or(line);
            match parts.next() {
                Some(version) => DependencyRecord::new(path, name.trim(), version.trim()),
                None => DependencyRecord::new(path, line, UNKNOWN_VERSION),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requirements() {
        let path = Path::new("requirements.txt");
        let content = "\
# web
flask==2.0.1

requests
  numpy == 1.26.0
";
        let deps = parse_requirements(path, content);

        assert_eq!(
            deps,
            vec![
                DependencyRecord::new(path, "flask", "2.0.1"),
                DependencyRecord::new(path, "requests", "Unknown"),
                DependencyRecord::new(path, "numpy", "1.26.0"),
            ]
        );
    }

    #[test]
    fn test_range_specifiers_are_kept_whole() {
        let path = Path::new("requirements.txt");
        let deps = parse_requirements(path, "django>=4.0\n");
        assert_eq!(deps, vec![DependencyRecord::new(path, "django>=4.0", "Unknown")]);
    }

    #[test]
    fn test_repeated_pin_keeps_first_version() {
        let path = Path::new("requirements.txt");
        let deps = parse_requirements(path, "a==1==2\n");
        assert_eq!(deps, vec![DependencyRecord::new(path, "a", "1")]);
    }

    #[test]
    fn test_empty_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("requirements.txt");
        std::fs::write(&path, "").unwrap();

        assert!(RequirementsParser.parse(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("requirements.txt");
        assert!(matches!(
            RequirementsParser.parse(&path),
            Err(ManifestError::Io { .. })
        ));
    }
}
