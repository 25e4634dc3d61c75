//! Dependency specifier splitting: `"numpy>=1.20; python_version>='3.8'"`
//! into a package name and a version/condition string.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::UNKNOWN_VERSION;

const COMPARATOR: &str = r"(?:===|==|!=|~=|>=|<=|>|<|=|\^|~)";
const VERSION: &str = r"[\w.*+!\-]+";

static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    let clause = format!(r"{COMPARATOR}\s*{VERSION}");
    Regex::new(&format!(
        r"^([\w\-.]+)\s*(?:\[[^\]]*\])?\s*({clause}(?:\s*,\s*{clause})*)?\s*(;.*)?$"
    ))
    .unwrap()
});

/// Split a raw specifier into `(package, version)`.
///
/// Extras (`pkg[extra]`) are dropped. A trailing `; marker` condition is
/// appended to the version when a version clause is present. Without a
/// version clause the version is `"Unknown"`. Strings that don't look like a
/// specifier at all come back unchanged as the package name.
pub fn split_dependency(spec: &str) -> (String, String) {
    let spec = spec.trim();

    let Some(caps) = SPECIFIER.captures(spec) else {
        return (spec.to_string(), UNKNOWN_VERSION.to_string());
    };

    let package = caps[1].to_string();
    let version = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    let condition = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

    let version = match (version.is_empty(), condition.is_empty()) {
        (true, _) => UNKNOWN_VERSION.to_string(),
        (false, true) => version.to_string(),
        (false, false) => format!("{version} {condition}"),
    };

    (package, version)
}

/// Compose a specifier from a table entry such as `requests = "^2.0"`.
///
/// `"*"` means "any version"; a bare version number means an exact pin.
pub fn join_constraint(name: &str, constraint: &str) -> String {
    let constraint = constraint.trim();

    if constraint.is_empty() || constraint == "*" {
        name.to_string()
    } else if constraint.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{name}=={constraint}")
    } else {
        format!("{name}{constraint}")
    }
}
