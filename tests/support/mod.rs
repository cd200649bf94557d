#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use equipment_catalog::RawRecord;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn build_catalog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_build-catalog"))
}

pub fn check_catalog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_check-catalog"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Bucket row shaped like a live API response, with list-valued fields
/// wrapped the way the wiki returns them.
pub struct RowBuilder {
    fields: Map<String, Value>,
}

impl RowBuilder {
    pub fn new(key: &str, name: &str, id: &str, slot: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("page_name".into(), json!(name));
        fields.insert("page_name_sub".into(), json!(key));
        fields.insert("item_name".into(), json!([name]));
        fields.insert("item_id".into(), json!([id]));
        fields.insert("image".into(), json!([format!("File:{name}.png")]));
        fields.insert("infobox_bonuses.equipment_slot".into(), json!(slot));
        Self { fields }
    }

    pub fn version(self, version: &str) -> Self {
        self.field("version_anchor", json!(version))
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub fn record(&self) -> RawRecord {
        serde_json::from_value(self.value()).expect("row builder produces valid rows")
    }
}

/// Write `rows` as a saved `{"bucket": [...]}` response.
pub fn write_dump(dir: &Path, rows: &[RowBuilder]) -> Result<PathBuf> {
    let path = dir.join("bucket_dump.json");
    let body = json!({ "bucket": rows.iter().map(RowBuilder::value).collect::<Vec<_>>() });
    std::fs::write(&path, serde_json::to_vec_pretty(&body)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let data =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
