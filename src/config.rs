// src/config.rs
//! User overrides loaded from `utskel.toml`.
//!
//! The file mirrors the configuration tree: top-level tables are engine
//! profiles or the `test` layout section. Values are deep-merged over the
//! built-in defaults.

use crate::error::{Result, SkeletonError};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "utskel.toml";

/// Parses TOML text into a configuration tree.
///
/// # Errors
/// Returns `InvalidArgument` when the text is not valid TOML.
pub fn parse_toml(content: &str) -> Result<Value> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| SkeletonError::InvalidArgument(format!("invalid {CONFIG_FILE}: {e}")))?;
    serde_json::to_value(table)
        .map_err(|e| SkeletonError::InvalidArgument(format!("invalid {CONFIG_FILE}: {e}")))
}

/// Loads overrides from `path`. A missing file yields an empty tree.
///
/// # Errors
/// Returns an I/O error if the file exists but cannot be read, or a parse error.
pub fn load_overrides(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(Value::Null);
    }
    let content = fs::read_to_string(path).map_err(|e| SkeletonError::io(e, path))?;
    parse_toml(&content)
}

/// Starter configuration written by `utskel --init`.
#[must_use]
pub fn generate_toml() -> String {
    r#"# utskel.toml
[test]
root_marker = "test"
output_suffix = "test/unit"
ignore_segment = "lib"
generated_marker = "gen"
extension = "php"

# Engine profiles can be tuned too, e.g.:
# [php_unit.classname]
# pattern = "*.php"
# regex = '^(\w+)\.php$'
"#
    .to_string()
}
