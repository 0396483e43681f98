// src/inspect/php.rs
//! Source-level introspection of PHP classes.
//!
//! Classes are located through a [`ClassLookup`] and read from disk. Parents
//! known to the same lookup contribute their methods as inherited ones.

use super::scan::{brace_depths, matching_brace};
use super::{short_name, ClassInfo, Inspect, MethodInfo, NAMESPACE_SEPARATOR};
use crate::classpath::ClassLookup;
use crate::error::{Result, SkeletonError};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::sync::LazyLock;

const DOC: &str = r"(?P<doc>/\*\*(?:[^*]|\*+[^*/])*\*+/)?\s*";

static NAMESPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+(?P<ns>[\w\\]+)\s*[;{]")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static USE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*use\s+\\?(?P<fqn>[\w\\]+)(?:\s+as\s+(?P<alias>\w+))?\s*;")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?m){DOC}^[ \t]*(?:(?:abstract|final|readonly)\s+)*class\s+(?P<name>\w+)(?:\s+extends\s+(?P<parent>\\?[\w\\]+))?[^{{]*\{{"
    );
    Regex::new(&pattern).unwrap_or_else(|_| panic!("Invalid Regex"))
});
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?m){DOC}^[ \t]*(?:(?:abstract|final|public|protected|private|static)\s+)*function\s+&?(?P<name>\w+)\s*\("
    );
    Regex::new(&pattern).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Namespace declared by a PHP source file, if any.
#[must_use]
pub fn declared_namespace(source: &str) -> Option<String> {
    NAMESPACE_RE
        .captures(source)
        .and_then(|caps| caps.name("ns"))
        .map(|m| m.as_str().trim_start_matches(NAMESPACE_SEPARATOR).to_string())
}

pub struct PhpInspector<L: ClassLookup> {
    lookup: L,
}

impl<L: ClassLookup> PhpInspector<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    fn inspect_inner(&self, identifier: &str, seen: &mut HashSet<String>) -> Result<ClassInfo> {
        let fail = |reason: String| SkeletonError::Introspection {
            class: identifier.to_string(),
            reason,
        };

        let path = self
            .lookup
            .lookup(identifier)
            .ok_or_else(|| fail("class is not registered".to_string()))?;
        let bytes =
            fs::read(&path).map_err(|e| fail(format!("cannot read {}: {e}", path.display())))?;
        let source = String::from_utf8_lossy(&bytes);

        let wanted = short_name(identifier);
        let mut info = parse_class(&source, wanted)
            .ok_or_else(|| fail(format!("no class {wanted} declared in {}", path.display())))?;

        seen.insert(info.name.to_ascii_lowercase());
        if let Some(parent) = info.parent.clone() {
            if !seen.contains(&parent.to_ascii_lowercase()) {
                // Unknown parents contribute nothing.
                if let Ok(parent_info) = self.inspect_inner(&parent, seen) {
                    inherit(&mut info, parent_info);
                }
            }
        }
        Ok(info)
    }
}

impl<L: ClassLookup> Inspect for PhpInspector<L> {
    fn exists(&self, identifier: &str) -> bool {
        self.lookup
            .lookup(identifier)
            .is_some_and(|path| path.is_file())
    }

    fn inspect(&self, identifier: &str) -> Result<ClassInfo> {
        self.inspect_inner(identifier, &mut HashSet::new())
    }
}

fn inherit(child: &mut ClassInfo, parent: ClassInfo) {
    let own: HashSet<String> = child
        .methods
        .iter()
        .map(|m| m.name.to_ascii_lowercase())
        .collect();
    child.methods.extend(
        parent
            .methods
            .into_iter()
            .filter(|m| !own.contains(&m.name.to_ascii_lowercase())),
    );
}

/// Parses the class named `wanted` out of `source`.
fn parse_class(source: &str, wanted: &str) -> Option<ClassInfo> {
    let depths = brace_depths(source);
    let at_top = |offset: usize| depths.get(offset).copied() == Some(0);

    let namespace = declared_namespace(source).unwrap_or_default();
    let imports = imports(source, &at_top);

    let caps = CLASS_RE.captures_iter(source).find(|caps| {
        caps.name("name")
            .is_some_and(|m| at_top(m.start()) && m.as_str().eq_ignore_ascii_case(wanted))
    })?;

    let declared = caps.name("name")?.as_str();
    let name = qualify(&namespace, declared);
    let parent = caps
        .name("parent")
        .map(|m| resolve_parent(m.as_str(), &namespace, &imports));

    let open = caps.get(0)?.end() - 1;
    let close = matching_brace(source, &depths, open);
    let methods = parse_methods(source, &depths, open, close, &name);

    Some(ClassInfo {
        name,
        parent,
        doc_comment: caps.name("doc").map(|m| m.as_str().to_string()),
        methods,
    })
}

fn parse_methods(
    source: &str,
    depths: &[usize],
    open: usize,
    close: usize,
    class: &str,
) -> Vec<MethodInfo> {
    let body_depth = depths.get(open).copied().unwrap_or(0) + 1;
    let body = source.get(open + 1..close).unwrap_or_default();

    METHOD_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let name = caps.name("name")?;
            if depths.get(open + 1 + name.start()).copied() != Some(body_depth) {
                return None;
            }
            Some(MethodInfo {
                name: name.as_str().to_string(),
                declaring_class: class.to_string(),
                doc_comment: caps.name("doc").map(|m| m.as_str().to_string()),
            })
        })
        .collect()
}

fn imports(source: &str, at_top: &dyn Fn(usize) -> bool) -> HashMap<String, String> {
    USE_RE
        .captures_iter(source)
        .filter(|caps| caps.get(0).is_some_and(|m| at_top(m.start())))
        .filter_map(|caps| {
            let fqn = caps.name("fqn")?.as_str().to_string();
            let alias = caps
                .name("alias")
                .map_or_else(|| short_name(&fqn).to_string(), |m| m.as_str().to_string());
            Some((alias.to_ascii_lowercase(), fqn))
        })
        .collect()
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{name}")
    }
}

fn resolve_parent(raw: &str, namespace: &str, imports: &HashMap<String, String>) -> String {
    if let Some(absolute) = raw.strip_prefix(NAMESPACE_SEPARATOR) {
        return absolute.to_string();
    }
    let (head, rest) = raw
        .split_once(NAMESPACE_SEPARATOR)
        .map_or((raw, None), |(head, rest)| (head, Some(rest)));
    match (imports.get(&head.to_ascii_lowercase()), rest) {
        (Some(fqn), None) => fqn.clone(),
        (Some(fqn), Some(rest)) => format!("{fqn}{NAMESPACE_SEPARATOR}{rest}"),
        (None, _) => qualify(namespace, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOO: &str = r#"<?php
namespace App\Model;

use Vendor\Base\Entity as BaseEntity;

/**
 * A foo.
 * @fixtures foo.yml
 */
final class Foo extends BaseEntity implements \Countable
{
    private $map = array('{' => '}');

    /**
     * @param string $name
     * @return bool
     */
    public function hasName($name)
    {
        $cb = function ($x) { return $x; };
        return true;
    }

    public static function count() {}
}
"#;

    #[test]
    fn test_declared_namespace() {
        assert_eq!(declared_namespace(FOO).as_deref(), Some("App\\Model"));
        assert_eq!(declared_namespace("<?php class A {}"), None);
    }

    #[test]
    fn test_parse_class_structure() {
        let info = parse_class(FOO, "Foo").unwrap();
        assert_eq!(info.name, "App\\Model\\Foo");
        assert_eq!(info.parent.as_deref(), Some("Vendor\\Base\\Entity"));
        assert!(info.doc_comment.unwrap().contains("@fixtures foo.yml"));

        let names: Vec<_> = info.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["hasName", "count"]);
        assert!(info.methods[0].doc_comment.as_ref().unwrap().contains("@return bool"));
        assert!(info.methods[1].doc_comment.is_none());
        assert!(info.methods.iter().all(|m| m.declaring_class == "App\\Model\\Foo"));
    }

    #[test]
    fn test_parent_resolution() {
        let imports = HashMap::from([("base".to_string(), "Lib\\Base".to_string())]);
        assert_eq!(resolve_parent("\\Root", "App", &imports), "Root");
        assert_eq!(resolve_parent("Base", "App", &imports), "Lib\\Base");
        assert_eq!(resolve_parent("Base\\Sub", "App", &imports), "Lib\\Base\\Sub");
        assert_eq!(resolve_parent("Other", "App", &imports), "App\\Other");
        assert_eq!(resolve_parent("Other", "", &imports), "Other");
    }

    #[test]
    fn test_no_class_declared() {
        assert!(parse_class("<?php function helper() {}", "Foo").is_none());
    }

    #[test]
    fn test_other_class_is_not_taken() {
        assert!(parse_class("<?php\nclass Bar\n{\n    public function run() {}\n}\n", "Foo").is_none());
        let info = parse_class("<?php\nclass Bar {}\nclass foo {}\n", "Foo").unwrap();
        assert_eq!(info.name, "foo");
    }
}
