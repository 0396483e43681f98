// src/render.rs
//! Built-in test skeleton templates.
//!
//! Templates receive the class metadata as a data tree with a `bootstrap`
//! prefix (one `/..` per mirrored directory level) merged beneath it.

use crate::error::{Result, SkeletonError};
use crate::metadata::{ClassMetadata, MethodMetadata};
use crate::store::merge;
use crate::test_path::ucfirst;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt::Write;

pub const PHP_UNIT: &str = "php_unit";
pub const LIME: &str = "lime";

/// Relative-path prefix climbing `depth` directory levels.
#[must_use]
pub fn bootstrap(depth: usize) -> String {
    "/..".repeat(depth)
}

/// Builds the data tree handed to a template. Metadata keys win on conflict.
///
/// # Errors
/// Returns `Render` if the metadata cannot be serialized.
pub fn template_data(meta: &ClassMetadata, identifier: &str, depth: usize) -> Result<Value> {
    let mut data = json!({
        "bootstrap": bootstrap(depth),
        "identifier": identifier,
    });
    let meta = serde_json::to_value(meta).map_err(|e| SkeletonError::Render(e.to_string()))?;
    merge(&mut data, meta);
    Ok(data)
}

pub trait Render {
    /// # Errors
    /// Fails for unknown templates or malformed data.
    fn render(&self, template: &str, data: &Value) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct TemplateData {
    #[serde(default)]
    bootstrap: String,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(flatten)]
    class: ClassMetadata,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl Render for BuiltinTemplates {
    fn render(&self, template: &str, data: &Value) -> Result<String> {
        let data: TemplateData = serde_json::from_value(data.clone())
            .map_err(|e| SkeletonError::Render(format!("template \"{template}\": {e}")))?;
        match template {
            PHP_UNIT => php_unit(&data),
            LIME => lime(&data),
            _ => Err(SkeletonError::MissingConfiguration {
                owner: "BuiltinTemplates",
                path: format!("template.file ({template})"),
            }),
        }
    }
}

fn php_unit(data: &TemplateData) -> Result<String> {
    let class = &data.class.short_name;
    let mut out = String::new();

    writeln!(out, "<?php\n")?;
    writeln!(
        out,
        "require_once dirname(__FILE__).'{}/../bootstrap/unit.php';\n",
        data.bootstrap
    )?;
    if let Some(identifier) = data.identifier.as_deref().filter(|id| *id != class.as_str()) {
        writeln!(out, "use {identifier};\n")?;
    }
    writeln!(out, "/**\n * Generated test skeleton for {class}.\n */")?;
    writeln!(out, "class {class}Test extends PHPUnit_Framework_TestCase\n{{")?;
    writeln!(out, "    /**\n     * @var {class}\n     */\n    protected $object;\n")?;
    writeln!(out, "    protected function setUp()\n    {{")?;
    for fixture in &data.class.fixtures {
        writeln!(out, "        // fixture: {fixture}")?;
    }
    writeln!(out, "        $this->object = new {class}();\n    }}")?;

    for method in &data.class.methods {
        writeln!(out)?;
        writeln!(out, "    /**\n     * @covers {class}::{}", method.name)?;
        write_signature_notes(&mut out, method, "     * ")?;
        writeln!(out, "     */")?;
        writeln!(out, "    public function test{}()\n    {{", ucfirst(&method.name))?;
        writeln!(
            out,
            "        $this->markTestIncomplete('{class}::{}() has not been tested yet.');\n    }}",
            method.name
        )?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}

fn lime(data: &TemplateData) -> Result<String> {
    let class = &data.class.short_name;
    let mut out = String::new();

    writeln!(out, "<?php\n")?;
    writeln!(
        out,
        "include dirname(__FILE__).'{}/../bootstrap/unit.php';\n",
        data.bootstrap
    )?;
    for fixture in &data.class.fixtures {
        writeln!(out, "// fixture: {fixture}")?;
    }
    writeln!(out, "$t = new lime_test();\n")?;
    writeln!(out, "$t->diag('{class}');")?;

    for method in &data.class.methods {
        writeln!(out, "\n$t->comment('->{}()');", method.name)?;
        write_signature_notes(&mut out, method, "// ")?;
        writeln!(out, "$t->todo('{class}::{}()');", method.name)?;
    }
    Ok(out)
}

fn write_signature_notes(out: &mut String, method: &MethodMetadata, prefix: &str) -> Result<()> {
    if !method.parameters.is_empty() {
        writeln!(out, "{prefix}parameters: {}", method.parameters.join(", "))?;
    }
    if !method.returns.is_empty() {
        writeln!(out, "{prefix}returns: {}", method.returns.join(", "))?;
    }
    if !method.exceptions.is_empty() {
        writeln!(out, "{prefix}throws: {}", method.exceptions.join(", "))?;
    }
    Ok(())
}
