//! JSON Schema loading for the persisted catalog.
//!
//! The canonical schema ships inside the binary; callers may point at an
//! on-disk copy instead (for example while evolving the schema). Either way
//! the schema is compiled once and reused for every validation.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Canonical catalog schema, embedded at build time.
pub const CATALOG_SCHEMA: &str = include_str!("../schema/equipment_catalog.schema.json");

/// Compiled catalog schema.
pub struct CatalogSchema {
    pub title: String,
    compiled: JSONSchema,
}

impl CatalogSchema {
    /// Compile the schema embedded in the crate.
    pub fn embedded() -> Result<Self> {
        let value: Value =
            serde_json::from_str(CATALOG_SCHEMA).context("parsing embedded catalog schema")?;
        Self::compile(&value, "embedded catalog schema")
    }

    /// Read and compile a schema from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
        let value: Value = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing schema {}", path.display()))?;
        Self::compile(&value, &path.display().to_string())
    }

    fn compile(value: &Value, label: &str) -> Result<Self> {
        if !value.is_object() {
            bail!("{label} must be a JSON object");
        }
        let title = value
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("catalog")
            .to_string();
        let compiled =
            JSONSchema::compile(value).map_err(|err| anyhow!("compiling {label}: {err}"))?;
        Ok(Self { title, compiled })
    }

    /// Every schema violation in `document`, one message per error.
    pub fn violations(&self, document: &Value) -> Vec<String> {
        match self.compiled.validate(document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|err| {
                    let path = err.instance_path.to_string();
                    if path.is_empty() {
                        err.to_string()
                    } else {
                        format!("{path}: {err}")
                    }
                })
                .collect(),
        }
    }

    /// Fail with every violation listed when `document` does not conform.
    pub fn validate(&self, document: &Value) -> Result<()> {
        let violations = self.violations(document);
        if violations.is_empty() {
            return Ok(());
        }
        bail!(
            "{} failed schema validation:\n{}",
            self.title,
            violations.join("\n")
        );
    }
}
