//! Merge, ordering, and persistence of the final catalog.
//!
//! Wiki-derived entries and curated entries are concatenated without any
//! cross-check, then ordered by name with a stable sort so entries sharing a
//! name keep their merge order. Writes go through a temp file in the target
//! directory and are persisted in one rename.

use crate::catalog::{Equipment, EquipmentSlot};
use crate::schema_loader::CatalogSchema;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Append curated entries after the wiki-derived ones.
///
/// Duplication across the two sources is left to the curator.
pub fn merge_catalogs(wiki: Vec<Equipment>, manual: Vec<Equipment>) -> Vec<Equipment> {
    let mut merged = wiki;
    merged.extend(manual);
    merged
}

#[derive(Debug, Clone, PartialEq)]
/// Catalog in its persisted order.
pub struct CatalogDocument {
    entries: Vec<Equipment>,
}

impl CatalogDocument {
    /// Order merged entries by name (ordinal, stable).
    pub fn from_merged(mut entries: Vec<Equipment>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { entries }
    }

    pub fn entries(&self) -> &[Equipment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(&self.entries).context("serializing catalog")
    }

    /// Two-space indented JSON with non-ASCII text kept verbatim.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).context("serializing catalog")
    }

    /// Check the document against `schema`, then write it to `path`.
    pub fn validate_and_write(&self, schema: &CatalogSchema, path: &Path) -> Result<()> {
        schema.validate(&self.to_value()?)?;
        write_atomic(path, &self.to_json_pretty()?)
    }
}

/// Serialize `value` as pretty JSON and atomically replace `path`.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)
        .with_context(|| format!("serializing {}", path.display()))?;
    write_atomic(path, &body)
}

/// Replace `path` with `body` through a temp file in the same directory.
fn write_atomic(path: &Path, body: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("allocating temp file in {}", dir.display()))?;
    tmp.write_all(body.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    tmp.flush()?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("persisting {}", path.display()))?;
    Ok(())
}

/// Read a persisted catalog as raw JSON.
pub fn read_catalog_value(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Check the ordering and slot invariants of a persisted catalog.
///
/// Returns every problem instead of stopping at the first so a report can
/// list them all at once.
pub fn catalog_invariant_violations(entries: &[Equipment]) -> Vec<String> {
    let mut errors = Vec::new();
    for (idx, entry) in entries.iter().enumerate() {
        if entry.name.is_empty() {
            errors.push(format!("entry {idx} has an empty name"));
        }
        match (&entry.slot, entry.is_two_handed) {
            (EquipmentSlot::Other(slot), _) if slot == crate::slot::TWO_HANDED_MARKER => {
                errors.push(format!(
                    "entry {idx} ({}) still carries the two-handed slot marker",
                    entry.name
                ));
            }
            (EquipmentSlot::Weapon, None) => {
                errors.push(format!(
                    "entry {idx} ({}) is a weapon without is_two_handed",
                    entry.name
                ));
            }
            _ => {}
        }
    }
    for (idx, pair) in entries.windows(2).enumerate() {
        if pair[0].name > pair[1].name {
            errors.push(format!(
                "entries {idx} and {} out of order: '{}' sorts after '{}'",
                idx + 1,
                pair[0].name,
                pair[1].name
            ));
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Bonuses;
    use tempfile::TempDir;

    fn entry(name: &str, id: i64) -> Equipment {
        Equipment {
            name: name.to_string(),
            id,
            version: None,
            slot: EquipmentSlot::Head,
            image: String::new(),
            speed: None,
            category: None,
            bonuses: Bonuses::default(),
            is_two_handed: None,
            attack_range: None,
        }
    }

    #[test]
    fn merge_appends_manual_entries_without_dedup() {
        let merged = merge_catalogs(vec![entry("Helm", 1)], vec![entry("Helm", 2)]);
        assert_eq!(merged.iter().map(|e| e.id).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn sort_is_ordinal_and_stable() {
        let doc = CatalogDocument::from_merged(vec![
            entry("b", 1),
            entry("Z", 2),
            entry("a", 3),
            entry("Z", 4),
            entry("Á", 5),
        ]);
        let order: Vec<i64> = doc.entries().iter().map(|e| e.id).collect();
        assert_eq!(order, [2, 4, 3, 1, 5]);
        assert!(catalog_invariant_violations(doc.entries()).is_empty());
    }

    #[test]
    fn pretty_output_keeps_unicode() {
        let doc = CatalogDocument::from_merged(vec![entry("Ahrim's hood — Ñ", 1)]);
        let json = doc.to_json_pretty().unwrap();
        assert!(json.contains("Ahrim's hood — Ñ"));
        assert!(json.starts_with("[\n  {\n    \"name\""));
    }

    #[test]
    fn validate_and_write_persists_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("equipment.json");
        let doc = CatalogDocument::from_merged(vec![entry("Helm", 1)]);
        let schema = CatalogSchema::embedded().unwrap();
        doc.validate_and_write(&schema, &path).unwrap();
        let value = read_catalog_value(&path).unwrap();
        assert_eq!(value[0]["name"], "Helm");
        assert_eq!(value[0]["bonuses"]["attack"]["stab"], 0);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, doc.to_json_pretty().unwrap());
    }

    #[test]
    fn invariant_check_reports_every_problem() {
        let mut two_handed = entry("Bow", 1);
        two_handed.slot = EquipmentSlot::Other("2h".to_string());
        let mut weapon = entry("Axe", 2);
        weapon.slot = EquipmentSlot::Weapon;
        let errors = catalog_invariant_violations(&[two_handed, weapon]);
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("two-handed slot marker")));
        assert!(errors.iter().any(|e| e.contains("without is_two_handed")));
        assert!(errors.iter().any(|e| e.contains("out of order")));
    }
}
