// src/metadata.rs
//! Normalized class description built from introspection and doc-comment tags.

use crate::error::Result;
use crate::inspect::{short_name, Inspect, MethodInfo};
use crate::store::Store;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIXTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\* @fixtures ([\w./]+)").unwrap_or_else(|_| panic!("Invalid Regex"))
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\* @([a-z]+) (\w+)( \$\w+)?").unwrap_or_else(|_| panic!("Invalid Regex"))
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetadata {
    pub name: String,
    pub parameters: Vec<String>,
    pub returns: Vec<String>,
    pub exceptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub short_name: String,
    pub fixtures: Vec<String>,
    pub methods: Vec<MethodMetadata>,
}

/// Describes `identifier`: short name, fixtures and own methods' tags.
///
/// # Errors
/// Returns `Introspection` if the class cannot be inspected.
pub fn parse(identifier: &str, inspector: &dyn Inspect, store: &Store) -> Result<ClassMetadata> {
    store.log("parsing", &format!("Parsing class \"{identifier}\""));
    let info = inspector.inspect(identifier)?;

    let methods = info
        .methods
        .iter()
        .filter(|m| m.declaring_class.eq_ignore_ascii_case(identifier))
        .map(method_metadata)
        .collect();

    Ok(ClassMetadata {
        short_name: short_name(identifier).to_string(),
        fixtures: fixtures(info.doc_comment.as_deref().unwrap_or_default()),
        methods,
    })
}

/// Every `@fixtures` token of a class doc comment, in source order.
#[must_use]
pub fn fixtures(doc: &str) -> Vec<String> {
    FIXTURE_RE
        .captures_iter(doc)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn method_metadata(method: &MethodInfo) -> MethodMetadata {
    let mut meta = MethodMetadata {
        name: method.name.clone(),
        ..MethodMetadata::default()
    };
    let doc = method.doc_comment.as_deref().unwrap_or_default();

    for caps in TAG_RE.captures_iter(doc) {
        let (Some(tag), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let bucket = match tag.as_str() {
            "param" => &mut meta.parameters,
            "return" => &mut meta.returns,
            "throws" => &mut meta.exceptions,
            _ => continue,
        };
        bucket.push(value.as_str().to_string());
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(doc: &str) -> MethodInfo {
        MethodInfo {
            name: "run".to_string(),
            declaring_class: "Foo".to_string(),
            doc_comment: Some(doc.to_string()),
        }
    }

    #[test]
    fn test_tags_keep_order_and_duplicates() {
        let doc = "/**\n * @param string $a\n * @param string $b\n * @return int\n */";
        let meta = method_metadata(&method(doc));
        assert_eq!(meta.parameters, vec!["string", "string"]);
        assert_eq!(meta.returns, vec!["int"]);
        assert!(meta.exceptions.is_empty());
    }

    #[test]
    fn test_unknown_tags_are_ignored() {
        let doc = "/**\n * @throws RuntimeException\n * @uses parent::configure()\n * @param array $x\n */";
        let meta = method_metadata(&method(doc));
        assert_eq!(meta.exceptions, vec!["RuntimeException"]);
        assert_eq!(meta.parameters, vec!["array"]);
        assert!(meta.returns.is_empty());
    }

    #[test]
    fn test_untagged_method_has_empty_lists() {
        let meta = method_metadata(&MethodInfo {
            name: "bare".to_string(),
            declaring_class: "Foo".to_string(),
            doc_comment: None,
        });
        assert_eq!(meta.name, "bare");
        assert!(meta.parameters.is_empty() && meta.returns.is_empty() && meta.exceptions.is_empty());
    }

    #[test]
    fn test_fixtures() {
        let doc = "/**\n * @fixtures users.yml\n * @fixtures data/posts.yml\n * @fixtures users.yml\n */";
        assert_eq!(fixtures(doc), vec!["users.yml", "data/posts.yml", "users.yml"]);
        assert!(fixtures("").is_empty());
    }
}
