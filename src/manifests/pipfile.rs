//! Pipenv manifests (`Pipfile`).

use std::path::Path;

use super::specifier::split_dependency;
use super::{ManifestError, ManifestParser, read_toml, table_specifiers};
use crate::types::DependencyRecord;

pub struct PipfileParser;

impl ManifestParser for PipfileParser {
    fn parse(&self, path: &Path) -> Result<Vec<DependencyRecord>, ManifestError> {
        let Some(pipfile) = read_toml(path)? else {
            return Ok(vec![]);
        };

        Ok(table_specifiers(&pipfile, &["packages", "dev-packages"])
            .map(|spec| DependencyRecord::from_split(path, split_dependency(&spec)))
            .collect())
    }
}
