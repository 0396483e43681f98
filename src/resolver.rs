// src/resolver.rs
//! Turns a directory, a file, or a literal class name into class records.

use crate::classpath::ClassPaths;
use crate::error::{Result, SkeletonError};
use crate::inspect::{declared_namespace, Inspect, NAMESPACE_SEPARATOR};
use crate::store::{Store, FIND_CLASS_PATH};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub identifier: String,
    /// Empty when the file declares no namespace.
    pub namespace: String,
    /// Absent for literal identifiers.
    pub source_path: Option<PathBuf>,
}

/// Compiled `classname.pattern` / `classname.regex` settings.
#[derive(Debug, Clone)]
pub struct ClassnameRules {
    pub pattern: String,
    glob: Regex,
    regex: Regex,
}

impl ClassnameRules {
    /// Reads the rules from the store.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` if either key is absent, or a regex error.
    pub fn from_store(store: &Store) -> Result<Self> {
        let pattern = store.config().get_str(&["classname", "pattern"])?;
        let regex = store.config().get_str(&["classname", "regex"])?;
        Self::new(pattern, regex)
    }

    /// # Errors
    /// Returns a regex error if either expression is invalid.
    pub fn new(pattern: &str, regex: &str) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            glob: glob_to_regex(pattern)?,
            regex: Regex::new(strip_delimiters(regex))?,
        })
    }

    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.glob.is_match(file_name)
    }

    /// Short class name captured from a file name.
    #[must_use]
    pub fn short_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Translates a shell glob (`*`, `?`) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Ok(Regex::new(&re)?)
}

/// Accepts both `^(\w+)\.php$` and the delimited `/^(\w+)\.php$/` form.
fn strip_delimiters(regex: &str) -> &str {
    regex
        .strip_prefix('/')
        .and_then(|r| r.strip_suffix('/'))
        .unwrap_or(regex)
}

#[derive(Debug, Clone, Default)]
pub struct ClassResolver {
    paths: ClassPaths,
}

impl ClassResolver {
    #[must_use]
    pub fn new(paths: ClassPaths) -> Self {
        Self { paths }
    }

    /// Resolves `input` into the ordered list of classes to process.
    ///
    /// # Errors
    /// `NoClassesFound` for a directory (or file) without matching classes,
    /// `ClassNotFound` for an unknown literal identifier.
    pub fn resolve(
        &self,
        input: &str,
        store: &mut Store,
        inspector: &dyn Inspect,
    ) -> Result<Vec<ClassRecord>> {
        let path = Path::new(input);
        if path.is_dir() {
            return self.resolve_dir(path, store);
        }
        if path.is_file() {
            let rules = ClassnameRules::from_store(store)?;
            let record = self.derive(path, &rules, store)?.ok_or_else(|| {
                SkeletonError::NoClassesFound {
                    path: path.to_path_buf(),
                    pattern: rules.regex.as_str().to_string(),
                }
            })?;
            return Ok(vec![record]);
        }
        if !inspector.exists(input) {
            return Err(SkeletonError::ClassNotFound(input.to_string()));
        }
        Ok(vec![ClassRecord {
            identifier: input.to_string(),
            namespace: input
                .rsplit_once(NAMESPACE_SEPARATOR)
                .map(|(ns, _)| ns.to_string())
                .unwrap_or_default(),
            source_path: None,
        }])
    }

    fn resolve_dir(&self, dir: &Path, store: &mut Store) -> Result<Vec<ClassRecord>> {
        store.log("read-dir", &format!("read \"{}\" directory", dir.display()));
        let rules = ClassnameRules::from_store(store)?;

        let mut records = Vec::new();
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            if !rules.matches(&entry.file_name().to_string_lossy()) {
                continue;
            }
            if let Some(record) = self.derive(entry.path(), &rules, store)? {
                records.push(record);
            }
        }

        if records.is_empty() {
            return Err(SkeletonError::NoClassesFound {
                path: dir.to_path_buf(),
                pattern: rules.pattern,
            });
        }
        Ok(records)
    }

    /// Records every matching file below `root` without selecting it for
    /// generation, so literal identifiers can be found later.
    ///
    /// # Errors
    /// Returns an error if the walk fails or a matching file cannot be read.
    pub fn register_tree(&self, root: &Path, store: &mut Store) -> Result<usize> {
        store.log("read-dir", &format!("autoload \"{}\"", root.display()));
        let rules = ClassnameRules::from_store(store)?;

        let mut count = 0;
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.path().is_file()
                && rules.matches(&entry.file_name().to_string_lossy())
                && self.derive(entry.path(), &rules, store)?.is_some()
            {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Derives a record from a file and registers it. `None` when the file
    /// name does not yield a class name.
    fn derive(
        &self,
        path: &Path,
        rules: &ClassnameRules,
        store: &mut Store,
    ) -> Result<Option<ClassRecord>> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(short) = rules.short_name(&file_name) else {
            return Ok(None);
        };

        let bytes = fs::read(path).map_err(|e| SkeletonError::io(e, path))?;
        let namespace = declared_namespace(&String::from_utf8_lossy(&bytes)).unwrap_or_default();
        let identifier = if namespace.is_empty() {
            short.to_string()
        } else {
            format!("{namespace}{NAMESPACE_SEPARATOR}{short}")
        };

        self.paths.record(&identifier, path);
        store.bind(FIND_CLASS_PATH, self.paths.callback())?;

        Ok(Some(ClassRecord {
            identifier,
            namespace,
            source_path: Some(path.to_path_buf()),
        }))
    }
}
