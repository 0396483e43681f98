// tests/unit_resolver.rs
use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use utskel_core::classpath::{ClassLookup, ClassPaths};
use utskel_core::error::SkeletonError;
use utskel_core::inspect::PhpInspector;
use utskel_core::resolver::ClassResolver;
use utskel_core::skeleton::defaults;
use utskel_core::store::{Store, FIND_CLASS_PATH};

fn php_unit_store() -> Store {
    let mut store = Store::new("Skeleton");
    store.configure(defaults()["php_unit"].clone());
    store
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_directory_yields_sorted_matching_classes() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Zeta.php"), "<?php class Zeta {}");
    write(&temp.path().join("Alpha.php"), "<?php class Alpha {}");
    write(&temp.path().join("notes.txt"), "not a class");
    write(&temp.path().join("nested/Deep.php"), "<?php class Deep {}");

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();
    let inspector = PhpInspector::new(paths.clone());

    let records = resolver
        .resolve(temp.path().to_str().unwrap(), &mut store, &inspector)
        .unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(ids, vec!["Alpha", "Zeta"]);
    assert!(records.iter().all(|r| r.namespace.is_empty()));
    assert_eq!(
        records[0].source_path.as_deref(),
        Some(temp.path().join("Alpha.php").as_path())
    );
    assert!(!paths.contains("Deep"));
}

#[test]
fn test_namespace_prefixes_identifier() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("User.php");
    write(&file, "<?php\nnamespace App\\Model;\n\nclass User {}\n");

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();

    let records = resolver
        .resolve(file.to_str().unwrap(), &mut store, &PhpInspector::new(paths.clone()))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identifier, "App\\Model\\User");
    assert_eq!(records[0].namespace, "App\\Model");
    assert_eq!(paths.lookup("App\\Model\\User"), Some(file));
}

#[test]
fn test_resolution_binds_find_class_path() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("Foo.php");
    write(&file, "<?php class Foo {}");

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();
    assert!(!store.bound(FIND_CLASS_PATH));

    resolver
        .resolve(file.to_str().unwrap(), &mut store, &PhpInspector::new(paths))
        .unwrap();
    assert!(store.bound(FIND_CLASS_PATH));
    let answer = store.trigger(FIND_CLASS_PATH, &[json!("Foo")]).unwrap();
    assert_eq!(answer, Some(json!(file.to_string_lossy())));
}

#[test]
fn test_empty_directory_fails() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("readme.md"), "# nothing");

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();

    let err = resolver
        .resolve(temp.path().to_str().unwrap(), &mut store, &PhpInspector::new(paths))
        .unwrap_err();
    assert!(matches!(err, SkeletonError::NoClassesFound { pattern, .. } if pattern == "*.php"));
}

#[test]
fn test_unknown_literal_class_fails() {
    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();

    let err = resolver
        .resolve("DefinitelyMissing", &mut store, &PhpInspector::new(paths))
        .unwrap_err();
    assert!(matches!(err, SkeletonError::ClassNotFound(name) if name == "DefinitelyMissing"));
}

#[test]
fn test_autoloaded_literal_class_is_accepted() {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("lib/model/User.php"),
        "<?php\nnamespace App\\Model;\nclass User {}\n",
    );

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();
    let count = resolver.register_tree(temp.path(), &mut store).unwrap();
    assert_eq!(count, 1);

    let records = resolver
        .resolve("App\\Model\\User", &mut store, &PhpInspector::new(paths))
        .unwrap();
    assert_eq!(records[0].identifier, "App\\Model\\User");
    assert_eq!(records[0].namespace, "App\\Model");
    assert!(records[0].source_path.is_none());
}

#[test]
fn test_missing_classname_configuration() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("Foo.php"), "<?php class Foo {}");

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = Store::new("Skeleton");

    let err = resolver
        .resolve(temp.path().to_str().unwrap(), &mut store, &PhpInspector::new(paths))
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing configuration : Skeleton.classname.pattern");
}

#[cfg(unix)]
#[test]
fn test_symlinked_class_files_are_included() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("shared/Real.php"), "<?php class Real {}");
    fs::create_dir_all(temp.path().join("classes")).unwrap();
    std::os::unix::fs::symlink(
        temp.path().join("shared/Real.php"),
        temp.path().join("classes/Linked.php"),
    )
    .unwrap();

    let paths = ClassPaths::new();
    let resolver = ClassResolver::new(paths.clone());
    let mut store = php_unit_store();

    let records = resolver
        .resolve(
            temp.path().join("classes").to_str().unwrap(),
            &mut store,
            &PhpInspector::new(paths.clone()),
        )
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identifier, "Linked");

    assert_eq!(resolver.register_tree(&temp.path().join("classes"), &mut store).unwrap(), 1);
}
