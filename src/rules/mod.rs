//! Canonicalization rule tables.
//!
//! Both tables are static data handed to the catalog builder by reference, so
//! tests can swap in their own rules without touching the pipeline.

pub mod exclusion;
pub mod version;

pub use exclusion::{ContextualExclusion, ExclusionReason, ExclusionRules};
pub use version::{NameMatch, VersionAction, VersionOutcome, VersionRule, VersionRules};
