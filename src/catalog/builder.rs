//! Single-pass accumulation of wiki rows into catalog entries.
//!
//! Rows are consumed in delivery order. An identity key already holding a
//! retained entry short-circuits the row before any processing: the first
//! retained row per key wins and later rows are ignored wholesale, with no
//! field merging. Rows that are dropped leave their key free for a later row.

use crate::catalog::{Candidate, Equipment, IdentityKey};
use crate::extract::{ExtractError, extract_candidate};
use crate::record::RawRecord;
use crate::rules::{ExclusionReason, ExclusionRules, VersionOutcome, VersionRules};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
/// What happened to one ingested row.
pub enum IngestOutcome {
    Retained,
    Duplicate,
    Malformed(ExtractError),
    VersionDiscarded(&'static str),
    Excluded(ExclusionReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Per-pass counters reported once the build finishes.
pub struct BuildStats {
    pub records_seen: usize,
    pub duplicates: usize,
    pub malformed: usize,
    pub versions_collapsed: usize,
    pub version_discards: usize,
    pub exclusions: usize,
    pub retained: usize,
}

/// Accumulates retained candidates keyed by identity, in first-seen order.
pub struct CatalogBuilder<'r> {
    version_rules: &'r VersionRules,
    exclusions: &'r ExclusionRules,
    entries: IndexMap<IdentityKey, Equipment>,
    images: BTreeSet<String>,
    stats: BuildStats,
}

impl<'r> CatalogBuilder<'r> {
    pub fn new(version_rules: &'r VersionRules, exclusions: &'r ExclusionRules) -> Self {
        Self {
            version_rules,
            exclusions,
            entries: IndexMap::new(),
            images: BTreeSet::new(),
            stats: BuildStats::default(),
        }
    }

    /// Run one row through extraction, version resolution, exclusion, and
    /// dedup.
    pub fn ingest(&mut self, record: &RawRecord) -> IngestOutcome {
        self.stats.records_seen += 1;
        let key = record.page_name_sub.as_str();

        if self.entries.contains_key(key) {
            self.stats.duplicates += 1;
            log::debug!("{key}: duplicate identity key, keeping first entry");
            return IngestOutcome::Duplicate;
        }
        log::debug!("Processing {key}");

        let Candidate { key, mut equipment } = match extract_candidate(record) {
            Ok(candidate) => candidate,
            Err(err) => {
                self.stats.malformed += 1;
                log::warn!("Skipping {key}: {err}");
                return IngestOutcome::Malformed(err);
            }
        };

        match self.version_rules.resolve(&mut equipment) {
            VersionOutcome::Discarded(rule) => {
                self.stats.version_discards += 1;
                log::debug!("{key}: version dropped by rule '{rule}'");
                return IngestOutcome::VersionDiscarded(rule);
            }
            VersionOutcome::Collapsed(rule) => {
                self.stats.versions_collapsed += 1;
                log::debug!("{key}: version collapsed by rule '{rule}'");
            }
            VersionOutcome::Unchanged => {}
        }

        if let Some(reason) = self.exclusions.check(&equipment.name, key.as_str()) {
            self.stats.exclusions += 1;
            log::debug!("{key}: excluded ({reason})");
            return IngestOutcome::Excluded(reason);
        }

        if !equipment.image.is_empty() {
            self.images.insert(equipment.image.clone());
        }
        self.entries.insert(key, equipment);
        self.stats.retained += 1;
        IngestOutcome::Retained
    }

    /// Close the pass and hand over the retained entries in source order.
    pub fn finish(self) -> BuiltCatalog {
        BuiltCatalog {
            entries: self.entries.into_values().collect(),
            images: self.images,
            stats: self.stats,
        }
    }
}

#[derive(Debug, Clone)]
/// Output of a completed pass.
pub struct BuiltCatalog {
    /// Retained wiki entries in first-seen order.
    pub entries: Vec<Equipment>,
    /// Distinct non-empty image file names of the retained entries.
    pub images: BTreeSet<String>,
    pub stats: BuildStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn row(key: &str, name: &str, id: Value, version: Value) -> RawRecord {
        serde_json::from_value(json!({
            "page_name": name,
            "page_name_sub": key,
            "item_id": [id],
            "version_anchor": version,
            "image": [format!("File:{name}.png")],
            "infobox_bonuses.equipment_slot": "body"
        }))
        .unwrap()
    }

    #[test]
    fn first_retained_row_wins() {
        let versions = VersionRules::standard();
        let exclusions = ExclusionRules::standard();
        let mut builder = CatalogBuilder::new(&versions, &exclusions);

        assert_eq!(
            builder.ingest(&row("Rune platebody", "Rune platebody", json!("1127"), Value::Null)),
            IngestOutcome::Retained
        );
        assert_eq!(
            builder.ingest(&row("Rune platebody", "Rune platebody", json!("9999"), Value::Null)),
            IngestOutcome::Duplicate
        );
        let built = builder.finish();
        assert_eq!(built.entries.len(), 1);
        assert_eq!(built.entries[0].id, 1127);
        assert_eq!(built.stats.duplicates, 1);
    }

    #[test]
    fn dropped_rows_do_not_claim_their_key() {
        let versions = VersionRules::standard();
        let exclusions = ExclusionRules::standard();
        let mut builder = CatalogBuilder::new(&versions, &exclusions);

        let broken = row(
            "Dharok's platebody",
            "Dharok's platebody",
            json!("4720"),
            json!("Broken"),
        );
        assert_eq!(
            builder.ingest(&broken),
            IngestOutcome::VersionDiscarded("degradation charge state")
        );
        let bad_id = row("Dharok's platebody", "Dharok's platebody", json!("x"), Value::Null);
        assert!(matches!(builder.ingest(&bad_id), IngestOutcome::Malformed(_)));
        let good = row("Dharok's platebody", "Dharok's platebody", json!("4720"), Value::Null);
        assert_eq!(builder.ingest(&good), IngestOutcome::Retained);

        let stats = builder.finish().stats;
        assert_eq!(stats.records_seen, 3);
        assert_eq!(stats.version_discards, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.retained, 1);
    }

    #[test]
    fn preserves_source_order_and_collects_images() {
        let versions = VersionRules::standard();
        let exclusions = ExclusionRules::standard();
        let mut builder = CatalogBuilder::new(&versions, &exclusions);
        let rows = vec![
            row("Zamorak platebody", "Zamorak platebody", json!(2653), Value::Null),
            row("Battlehat", "Battlehat", json!(1), Value::Null),
            row("Abyssal whip#Normal", "Abyssal whip", json!(4151), json!("Normal")),
            row("Abyssal whip#Used", "Abyssal whip", json!(4151), json!("Used")),
        ];
        for row in &rows {
            builder.ingest(row);
        }
        let built = builder.finish();

        let names: Vec<&str> = built.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Zamorak platebody", "Abyssal whip", "Abyssal whip"]);
        assert!(built.entries.iter().all(|e| e.version.is_none()));
        assert_eq!(built.stats.exclusions, 1);
        assert_eq!(built.stats.versions_collapsed, 2);
        assert_eq!(
            built.images.into_iter().collect::<Vec<_>>(),
            ["Abyssal whip.png", "Zamorak platebody.png"]
        );
    }
}
