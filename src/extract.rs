//! Field extraction: raw bucket row to catalog candidate.
//!
//! Rows that cannot carry a valid catalog entry (no display name, no slot,
//! no integer id) are rejected with an [`ExtractError`]. Those are expected
//! data-quality conditions, so callers log and skip them rather than abort.

use crate::catalog::{Bonuses, Candidate, Equipment, IdentityKey, StrengthBonuses, StyleBonuses};
use crate::record::{RawRecord, coerce_float, coerce_int, first_value, last_value, scalar_text};
use crate::slot::normalize_slot;
use serde_json::Value;
use std::fmt;

/// Namespace prefix the wiki puts in front of file names.
const FILE_NAMESPACE: &str = "File:";

/// Why a raw row produced no candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    MissingKey,
    MissingName,
    MissingSlot,
    MissingId,
    InvalidId(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingKey => write!(f, "missing identity key"),
            ExtractError::MissingName => write!(f, "missing page name"),
            ExtractError::MissingSlot => write!(f, "missing equipment slot"),
            ExtractError::MissingId => write!(f, "missing item id"),
            ExtractError::InvalidId(raw) => write!(f, "invalid item id '{raw}' (not an int)"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Build a candidate from one source row.
///
/// Bonus fields default individually to zero; `speed` and `attack_range`
/// stay unset when absent or non-numeric.
pub fn extract_candidate(record: &RawRecord) -> Result<Candidate, ExtractError> {
    if record.page_name_sub.is_empty() {
        return Err(ExtractError::MissingKey);
    }
    let name = record
        .page_name
        .as_ref()
        .and_then(scalar_text)
        .filter(|name| !name.is_empty())
        .ok_or(ExtractError::MissingName)?;
    let id = parse_item_id(record.item_id.as_ref())?;
    let slot_marker = first_value(record.equipment_slot.as_ref())
        .and_then(scalar_text)
        .map(|slot| slot.trim().to_lowercase())
        .filter(|slot| !slot.is_empty())
        .ok_or(ExtractError::MissingSlot)?;
    let slot = normalize_slot(&slot_marker);

    let attack_range = record.weapon_attack_range.as_ref().and_then(|raw| {
        let coerced = optional_int(Some(raw));
        if coerced.is_none() && !raw.is_null() {
            log::warn!(
                "{}: ignoring non-numeric attack range {raw}",
                record.page_name_sub
            );
        }
        coerced
    });

    let equipment = Equipment {
        name,
        id,
        version: record.version_anchor.as_ref().and_then(scalar_text),
        slot: slot.slot,
        image: extract_image(record.image.as_ref()),
        speed: optional_int(record.weapon_attack_speed.as_ref()),
        category: record.combat_style.as_ref().and_then(scalar_text),
        bonuses: Bonuses {
            strength: StrengthBonuses {
                melee: int_or_zero(record.strength_bonus.as_ref()),
                ranged: int_or_zero(record.ranged_strength_bonus.as_ref()),
                magic: record
                    .magic_damage_bonus
                    .as_ref()
                    .and_then(coerce_float)
                    .unwrap_or(0.0),
            },
            attack: StyleBonuses {
                stab: int_or_zero(record.stab_attack_bonus.as_ref()),
                slash: int_or_zero(record.slash_attack_bonus.as_ref()),
                crush: int_or_zero(record.crush_attack_bonus.as_ref()),
                magic: int_or_zero(record.magic_attack_bonus.as_ref()),
                ranged: int_or_zero(record.range_attack_bonus.as_ref()),
            },
            defence: StyleBonuses {
                stab: int_or_zero(record.stab_defence_bonus.as_ref()),
                slash: int_or_zero(record.slash_defence_bonus.as_ref()),
                crush: int_or_zero(record.crush_defence_bonus.as_ref()),
                magic: int_or_zero(record.magic_defence_bonus.as_ref()),
                ranged: int_or_zero(record.range_defence_bonus.as_ref()),
            },
            prayer: int_or_zero(record.prayer_bonus.as_ref()),
        },
        is_two_handed: slot.is_two_handed,
        attack_range,
    };

    Ok(Candidate {
        key: IdentityKey(record.page_name_sub.clone()),
        equipment,
    })
}

fn parse_item_id(raw: Option<&Value>) -> Result<i64, ExtractError> {
    let first = first_value(raw).ok_or(ExtractError::MissingId)?;
    coerce_int(first).ok_or_else(|| {
        let text = scalar_text(first).unwrap_or_else(|| first.to_string());
        ExtractError::InvalidId(text)
    })
}

fn extract_image(raw: Option<&Value>) -> String {
    last_value(raw)
        .and_then(scalar_text)
        .map(|file| match file.strip_prefix(FILE_NAMESPACE) {
            Some(stripped) => stripped.to_string(),
            None => file,
        })
        .unwrap_or_default()
}

fn optional_int(raw: Option<&Value>) -> Option<i64> {
    raw.and_then(coerce_int)
}

fn int_or_zero(raw: Option<&Value>) -> i64 {
    optional_int(raw).unwrap_or(0)
}
