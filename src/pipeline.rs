//! One full catalog pass: source rows in, persisted catalog out.
//!
//! The pass is strictly sequential. Rows are canonicalized as each page
//! arrives, curated entries are appended once the source is exhausted, and
//! nothing is written until the merged catalog has passed schema validation.

use crate::catalog::{
    BuildStats, CatalogBuilder, CatalogDocument, Equipment, load_manual_catalog_from_path,
    merge_catalogs, write_json_atomic,
};
use crate::config::BuildConfig;
use crate::rules::{ExclusionRules, VersionRules};
use crate::schema_loader::CatalogSchema;
use crate::source::{BucketClient, DumpSource, PagingSummary, RecordSource, drain_pages};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
/// Counters summarizing one pass.
pub struct PipelineReport {
    pub pages: usize,
    pub records: usize,
    #[serde(flatten)]
    pub stats: BuildStats,
    pub wiki_entries: usize,
    pub manual_entries: usize,
    pub total_entries: usize,
    pub images: usize,
}

/// In-memory result of a pass, before anything is written.
pub struct CatalogOutput {
    pub document: CatalogDocument,
    /// Image files referenced by wiki-derived entries, for the asset fetcher.
    pub images: BTreeSet<String>,
    pub report: PipelineReport,
}

/// Canonicalize every row `source` delivers and merge in `manual`.
pub fn build_catalog<S>(
    source: &mut S,
    page_size: usize,
    version_rules: &VersionRules,
    exclusions: &ExclusionRules,
    manual: Vec<Equipment>,
) -> Result<CatalogOutput>
where
    S: RecordSource + ?Sized,
{
    let mut builder = CatalogBuilder::new(version_rules, exclusions);
    let paging: PagingSummary = drain_pages(source, page_size, |record| {
        builder.ingest(&record);
    })?;
    let built = builder.finish();

    let wiki_entries = built.entries.len();
    let manual_entries = manual.len();
    let document = CatalogDocument::from_merged(merge_catalogs(built.entries, manual));

    let report = PipelineReport {
        pages: paging.pages,
        records: paging.records,
        stats: built.stats,
        wiki_entries,
        manual_entries,
        total_entries: document.len(),
        images: built.images.len(),
    };
    Ok(CatalogOutput {
        document,
        images: built.images,
        report,
    })
}

/// Run the configured pass and write the catalog and image manifest.
pub fn run(config: &BuildConfig) -> Result<PipelineReport> {
    let schema = match &config.schema_path {
        Some(path) => CatalogSchema::load(path)?,
        None => CatalogSchema::embedded()?,
    };

    // Curated entries are read before any fetch so a bad file fails fast.
    let manual = match &config.manual_path {
        Some(path) => load_manual_catalog_from_path(path)?,
        None => Vec::new(),
    };

    let mut source: Box<dyn RecordSource> = match &config.input {
        Some(path) => {
            log::info!("Reading equipment rows from {}", path.display());
            Box::new(DumpSource::load(path)?)
        }
        None => Box::new(BucketClient::new(
            &config.api_url,
            &config.user_agent,
            config.timeout,
        )?),
    };

    let output = build_catalog(
        source.as_mut(),
        config.page_size,
        &VersionRules::standard(),
        &ExclusionRules::standard(),
        manual,
    )?;
    log::info!("Total equipment: {}", output.report.total_entries);

    log::info!("Saving to JSON at file: {}", config.output_path.display());
    output
        .document
        .validate_and_write(&schema, &config.output_path)
        .with_context(|| format!("writing catalog {}", config.output_path.display()))?;

    log::info!(
        "Saving {} required images to {}",
        output.images.len(),
        config.images_path.display()
    );
    write_json_atomic(&config.images_path, &output.images)
        .with_context(|| format!("writing image manifest {}", config.images_path.display()))?;

    Ok(output.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use serde_json::json;

    fn record(key: &str, name: &str, version: Option<&str>) -> RawRecord {
        serde_json::from_value(json!({
            "page_name": name,
            "page_name_sub": key,
            "item_id": ["100"],
            "version_anchor": version,
            "image": [format!("File:{key}.png")],
            "infobox_bonuses.equipment_slot": "2h"
        }))
        .unwrap()
    }

    #[test]
    fn report_counts_every_stage() {
        let mut source = DumpSource::from_records(vec![
            record("Staff#Normal", "Staff", Some("Normal")),
            record("Staff#Broken", "Staff", Some("Broken")),
            record("Staff#Normal", "Staff", None),
            record("Battlehat", "Battlehat", None),
        ]);
        let output = build_catalog(
            &mut source,
            3,
            &VersionRules::standard(),
            &ExclusionRules::standard(),
            Vec::new(),
        )
        .unwrap();

        let report = output.report;
        assert_eq!(report.pages, 2);
        assert_eq!(report.records, 4);
        assert_eq!(report.stats.duplicates, 1);
        assert_eq!(report.stats.version_discards, 1);
        assert_eq!(report.stats.exclusions, 1);
        assert_eq!(report.wiki_entries, 1);
        assert_eq!(report.total_entries, 1);
        assert_eq!(report.images, 1);

        let entry = &output.document.entries()[0];
        assert_eq!(entry.version, None);
        assert_eq!(entry.slot.as_str(), "weapon");
        assert_eq!(entry.is_two_handed, Some(true));
    }
}
