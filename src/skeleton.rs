// src/skeleton.rs
//! Test skeleton generation pipeline.
//!
//! For every resolved class: parse its metadata, build the mirrored test
//! path, render the template and write the file. The first failure ends the
//! run.

use crate::classpath::ClassPaths;
use crate::error::{Result, SkeletonError};
use crate::inspect::{Inspect, PhpInspector};
use crate::metadata::{self, ClassMetadata};
use crate::render::{self, BuiltinTemplates, Render};
use crate::resolver::ClassResolver;
use crate::store::{Listener, Store, FIND_CLASS_PATH};
use crate::test_path::{self, TestPath};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Name used in configuration error messages.
pub const OWNER: &str = "Skeleton";

/// Built-in engine profiles and test-tree layout.
#[must_use]
pub fn defaults() -> Value {
    json!({
        "php_unit": {
            "classname": {
                "pattern": "*.php",
                "regex": r"^(\w+)\.php$"
            },
            "template": { "file": render::PHP_UNIT }
        },
        "lime": {
            "classname": {
                "pattern": "*.class.php",
                "regex": r"^(\w+)\.class\.php$"
            },
            "template": { "file": render::LIME }
        },
        "test": {
            "root_marker": "test",
            "output_suffix": "test/unit",
            "ignore_segment": "lib",
            "generated_marker": "gen",
            "extension": "php"
        }
    })
}

/// One written skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub identifier: String,
    pub path: PathBuf,
    pub depth: usize,
    pub created_dirs: usize,
}

pub struct Skeleton {
    store: Store,
    resolver: ClassResolver,
    inspector: Box<dyn Inspect>,
    renderer: Box<dyn Render>,
}

impl Skeleton {
    /// Assembles a generator from its collaborators. Nothing is bound or
    /// configured yet.
    #[must_use]
    pub fn new(
        resolver: ClassResolver,
        inspector: Box<dyn Inspect>,
        renderer: Box<dyn Render>,
    ) -> Self {
        Self {
            store: Store::new(OWNER),
            resolver,
            inspector,
            renderer,
        }
    }

    /// Standard generator: PHP source introspection over a fresh class
    /// registry, built-in templates, defaults installed and `find_class_path`
    /// answered by the registry.
    #[must_use]
    pub fn create() -> Self {
        let paths = ClassPaths::new();
        let mut skeleton = Self::new(
            ClassResolver::new(paths.clone()),
            Box::new(PhpInspector::new(paths.clone())),
            Box::new(BuiltinTemplates),
        );
        paths.listen(skeleton.store.events_mut());
        skeleton.setup();
        skeleton
    }

    pub fn setup(&mut self) -> &mut Self {
        self.store.configure(defaults());
        self
    }

    pub fn configure(&mut self, overrides: Value) -> &mut Self {
        self.store.configure(overrides);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Merges the named engine profile into the root configuration.
    ///
    /// # Errors
    /// Returns `MissingConfiguration` if the profile does not exist.
    pub fn use_test_engine(&mut self, engine: &str) -> Result<&mut Self> {
        let profile = self.store.config().get_or_fail(&[engine])?.clone();
        self.store.configure(profile);
        Ok(self)
    }

    /// Registers every class file below `root` so literal class names resolve.
    ///
    /// # Errors
    /// Returns an error if the directory walk or a file read fails.
    pub fn autoload(&mut self, root: &Path) -> Result<usize> {
        self.resolver.register_tree(root, &mut self.store)
    }

    /// # Errors
    /// Returns `InvalidArgument` when `find_class_path` is not bound.
    pub fn checkup(&self) -> Result<()> {
        if !self.store.bound(FIND_CLASS_PATH) {
            return Err(SkeletonError::InvalidArgument(format!(
                "event \"{FIND_CLASS_PATH}\" has to be defined and must return class path from a classname"
            )));
        }
        Ok(())
    }

    /// Generates skeletons for every class designated by `input`.
    ///
    /// # Errors
    /// Propagates the first failure of any stage.
    pub fn run(&mut self, input: &str) -> Result<Vec<Generated>> {
        self.checkup()?;
        let records = self
            .resolver
            .resolve(input, &mut self.store, self.inspector.as_ref())?;

        let mut generated = Vec::with_capacity(records.len());
        for record in records {
            let meta = self.parse(&record.identifier)?;
            let target = test_path::build_path(&record.identifier, &self.store)?;
            let content = self.render(&meta, &record.identifier, target.depth)?;
            self.save(&record.identifier, &target, &content)?;
            generated.push(Generated {
                identifier: record.identifier,
                path: target.path,
                depth: target.depth,
                created_dirs: target.created.len(),
            });
        }
        Ok(generated)
    }

    /// # Errors
    /// Returns `Introspection` if the class cannot be inspected.
    pub fn parse(&self, identifier: &str) -> Result<ClassMetadata> {
        metadata::parse(identifier, self.inspector.as_ref(), &self.store)
    }

    /// # Errors
    /// Returns `MissingConfiguration` without `template.file`, or a render error.
    pub fn render(&self, meta: &ClassMetadata, identifier: &str, depth: usize) -> Result<String> {
        let template = self.store.config().get_str(&["template", "file"])?;
        let data = render::template_data(meta, identifier, depth)?;
        self.renderer.render(template, &data)
    }

    fn save(&self, identifier: &str, target: &TestPath, content: &str) -> Result<()> {
        fs::write(&target.path, content).map_err(|e| SkeletonError::WriteFailed {
            class: identifier.to_string(),
            source: e,
            path: target.path.clone(),
        })?;
        self.store.log("file+", &target.path.display().to_string());
        Ok(())
    }
}
