//! Shared library for the equipment catalog build.
//!
//! The crate turns paged wiki bucket rows into the canonical equipment
//! catalog consumed by the combat simulator. Public items here form the
//! contract the binaries depend on: the record sources, the canonicalization
//! pass (extraction, slot normalization, version resolution, exclusion,
//! dedup), the merge with curated entries, and schema-checked persistence.

use env_logger::Env;

pub mod catalog;
pub mod config;
pub mod extract;
pub mod pipeline;
pub mod record;
pub mod rules;
pub mod schema_loader;
pub mod slot;
pub mod source;

pub use catalog::{
    Bonuses, BuildStats, CatalogBuilder, CatalogDocument, Equipment, EquipmentSlot, IdentityKey,
    IngestOutcome, StrengthBonuses, StyleBonuses, catalog_invariant_violations,
    load_manual_catalog_from_path, merge_catalogs,
};
pub use config::BuildConfig;
pub use extract::{ExtractError, extract_candidate};
pub use pipeline::{CatalogOutput, PipelineReport, build_catalog};
pub use record::RawRecord;
pub use rules::{ExclusionRules, VersionRules};
pub use schema_loader::CatalogSchema;
pub use slot::{SlotAssignment, normalize_slot};
pub use source::{BucketClient, DumpSource, RecordSource, drain_pages};

/// Install the process logger, defaulting to `info` when `RUST_LOG` is unset.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}
