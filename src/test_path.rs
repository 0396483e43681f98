// src/test_path.rs
//! Locates (or fabricates) the mirrored test-tree location of a class.
//!
//! Starting at the directory holding the class source, the walk climbs until
//! it finds a directory containing the tests-root marker (the anchor). The
//! directories climbed through are replayed below `<anchor>/<output_suffix>`,
//! creating only those that are missing.

use crate::error::{Result, SkeletonError};
use crate::inspect::short_name;
use crate::store::{Store, FIND_CLASS_PATH};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Test-tree layout read from the `test.*` configuration keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLayout {
    pub root_marker: String,
    pub output_suffix: String,
    pub ignore_segment: Option<String>,
    pub generated_marker: String,
    pub extension: String,
}

impl TestLayout {
    /// # Errors
    /// Returns `MissingConfiguration` for any absent mandatory key.
    pub fn from_store(store: &Store) -> Result<Self> {
        let conf = store.config();
        let none = Value::Null;
        let ignore = conf
            .get(&["test", "ignore_segment"], &none)
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Ok(Self {
            root_marker: conf.get_str(&["test", "root_marker"])?.to_string(),
            output_suffix: conf.get_str(&["test", "output_suffix"])?.to_string(),
            ignore_segment: ignore,
            generated_marker: conf.get_str(&["test", "generated_marker"])?.to_string(),
            extension: conf.get_str(&["test", "extension"])?.to_string(),
        })
    }

    /// `<ShortName>Test.<marker>.<extension>` for a (possibly namespaced) identifier.
    #[must_use]
    pub fn file_name(&self, identifier: &str) -> String {
        format!(
            "{}Test.{}.{}",
            ucfirst(short_name(identifier)),
            self.generated_marker,
            self.extension
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPath {
    pub path: PathBuf,
    /// Mirrored levels below the destination root.
    pub depth: usize,
    /// Directories created by this call, outermost first.
    pub created: Vec<PathBuf>,
}

/// Builds the output path for `identifier`, creating missing directories.
///
/// # Errors
/// `SourcePathUnresolved`, `TestRootNotFound` or `DirectoryCreationFailed`.
pub fn build_path(identifier: &str, store: &Store) -> Result<TestPath> {
    let layout = TestLayout::from_store(store)?;
    let source = source_path(identifier, store)?;

    let source_dir = source.parent().unwrap_or(Path::new("/"));
    let (anchor, segments) = find_anchor(source_dir, &layout.root_marker).ok_or_else(|| {
        SkeletonError::TestRootNotFound {
            source_path: source.clone(),
            marker: layout.root_marker.clone(),
        }
    })?;

    let mut created = Vec::new();
    let mut dest = anchor.join(&layout.output_suffix);
    if !dest.is_dir() {
        fs::create_dir_all(&dest).map_err(|e| SkeletonError::DirectoryCreationFailed {
            source: e,
            path: dest.clone(),
        })?;
        store.log("dir+", &dest.display().to_string());
        created.push(dest.clone());
    }

    let anchor_name = anchor.file_name().map(|n| n.to_string_lossy().into_owned());
    let mut depth = 0;
    for segment in segments {
        if layout.ignore_segment.as_ref() == Some(&segment) || anchor_name.as_ref() == Some(&segment) {
            continue;
        }
        dest.push(&segment);
        if !dest.is_dir() {
            fs::create_dir(&dest).map_err(|e| SkeletonError::DirectoryCreationFailed {
                source: e,
                path: dest.clone(),
            })?;
            store.log("dir+", &dest.display().to_string());
            created.push(dest.clone());
        }
        depth += 1;
    }

    Ok(TestPath {
        path: dest.join(layout.file_name(identifier)),
        depth,
        created,
    })
}

/// Recovers the canonical source file of `identifier` through `find_class_path`.
fn source_path(identifier: &str, store: &Store) -> Result<PathBuf> {
    let unresolved = |path: String| SkeletonError::SourcePathUnresolved {
        class: identifier.to_string(),
        path,
    };
    let answer = store
        .trigger(FIND_CLASS_PATH, &[Value::from(identifier)])?
        .ok_or_else(|| unresolved(format!("event \"{FIND_CLASS_PATH}\" is not bound")))?;
    let raw = match answer {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    let path = PathBuf::from(&raw);
    if !path.is_file() {
        return Err(unresolved(raw));
    }
    fs::canonicalize(&path).map_err(|e| SkeletonError::io(e, path))
}

/// Climbs from `start` to the first directory containing `marker`.
///
/// Returns the anchor and the names of the directories below it, outermost
/// first, so that joining them onto the anchor yields `start` again.
fn find_anchor(start: &Path, marker: &str) -> Option<(PathBuf, Vec<String>)> {
    let mut segments = Vec::new();
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(marker).is_dir() {
            segments.reverse();
            return Some((dir.to_path_buf(), segments));
        }
        if let Some(name) = dir.file_name() {
            segments.push(name.to_string_lossy().into_owned());
        }
        current = dir.parent();
    }
    None
}

/// Uppercases the first character only.
#[must_use]
pub fn ucfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
