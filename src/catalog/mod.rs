//! Equipment catalog wiring.
//!
//! `model` and `identity` hold the persisted entry shape, `builder` runs the
//! single canonicalization pass over wiki rows, and `document` merges curated
//! additions, orders the result, and writes it out.

pub mod builder;
pub mod document;
pub mod identity;
pub mod model;

pub use builder::{BuildStats, BuiltCatalog, CatalogBuilder, IngestOutcome};
pub use document::{
    CatalogDocument, catalog_invariant_violations, merge_catalogs, read_catalog_value,
    write_json_atomic,
};
pub use identity::{EquipmentSlot, IdentityKey};
pub use model::{Bonuses, Candidate, Equipment, StrengthBonuses, StyleBonuses};

pub use model::load_manual_catalog_from_path;
