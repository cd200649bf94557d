//! Serializable representation of one catalog entry.
//!
//! Field order here is the field order of the persisted artifact, so the
//! structs double as the output contract consumed by the combat simulator.
//! Manually curated entries are read straight into the same types.

use crate::catalog::identity::{EquipmentSlot, IdentityKey};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Canonical catalog entry.
pub struct Equipment {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub version: Option<String>,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub speed: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub bonuses: Bonuses,
    /// `None` for non-weapon slots.
    #[serde(default)]
    pub is_two_handed: Option<bool>,
    #[serde(default)]
    pub attack_range: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bonuses {
    pub strength: StrengthBonuses,
    pub attack: StyleBonuses,
    pub defence: StyleBonuses,
    pub prayer: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthBonuses {
    pub melee: i64,
    pub ranged: i64,
    pub magic: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// Per-style values shared by the attack and defence blocks.
pub struct StyleBonuses {
    pub stab: i64,
    pub slash: i64,
    pub crush: i64,
    pub magic: i64,
    pub ranged: i64,
}

#[derive(Clone, Debug, PartialEq)]
/// In-progress entry still tied to the source row it came from.
pub struct Candidate {
    pub key: IdentityKey,
    pub equipment: Equipment,
}

/// Read the manually curated additions from disk.
///
/// The file is trusted as already canonical: no rule is applied, but a file
/// that cannot be read or parsed is fatal because silently dropping curated
/// entries would misrepresent the catalog.
pub fn load_manual_catalog_from_path(path: &Path) -> Result<Vec<Equipment>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading manual catalog {}", path.display()))?;
    let entries: Vec<Equipment> = serde_json::from_str(&data)
        .with_context(|| format!("parsing manual catalog {}", path.display()))?;
    Ok(entries)
}
