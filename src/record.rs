//! Raw rows as delivered by the wiki bucket query.
//!
//! Every field is optional and loosely typed: multi-valued fields arrive as
//! arrays, numeric fields may arrive as numbers or strings, and any field may
//! be `null`. Coercion into catalog types happens in `extract`, not here.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field names requested from the bucket API, in request order.
pub const BUCKET_FIELDS: &[&str] = &[
    "page_name",
    "page_name_sub",
    "item_name",
    "image",
    "item_id",
    "version_anchor",
    "infobox_bonuses.crush_attack_bonus",
    "infobox_bonuses.crush_defence_bonus",
    "infobox_bonuses.equipment_slot",
    "infobox_bonuses.magic_damage_bonus",
    "infobox_bonuses.magic_attack_bonus",
    "infobox_bonuses.magic_defence_bonus",
    "infobox_bonuses.prayer_bonus",
    "infobox_bonuses.range_attack_bonus",
    "infobox_bonuses.ranged_strength_bonus",
    "infobox_bonuses.range_defence_bonus",
    "infobox_bonuses.slash_attack_bonus",
    "infobox_bonuses.slash_defence_bonus",
    "infobox_bonuses.stab_attack_bonus",
    "infobox_bonuses.stab_defence_bonus",
    "infobox_bonuses.strength_bonus",
    "infobox_bonuses.weapon_attack_range",
    "infobox_bonuses.weapon_attack_speed",
    "infobox_bonuses.combat_style",
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// One source row keyed by `page_name_sub`.
pub struct RawRecord {
    #[serde(default)]
    pub page_name: Option<Value>,
    #[serde(default, deserialize_with = "lenient_key")]
    pub page_name_sub: String,
    #[serde(default)]
    pub item_name: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub item_id: Option<Value>,
    #[serde(default)]
    pub version_anchor: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.equipment_slot")]
    pub equipment_slot: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.stab_attack_bonus")]
    pub stab_attack_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.slash_attack_bonus")]
    pub slash_attack_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.crush_attack_bonus")]
    pub crush_attack_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.magic_attack_bonus")]
    pub magic_attack_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.range_attack_bonus")]
    pub range_attack_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.stab_defence_bonus")]
    pub stab_defence_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.slash_defence_bonus")]
    pub slash_defence_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.crush_defence_bonus")]
    pub crush_defence_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.magic_defence_bonus")]
    pub magic_defence_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.range_defence_bonus")]
    pub range_defence_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.strength_bonus")]
    pub strength_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.ranged_strength_bonus")]
    pub ranged_strength_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.magic_damage_bonus")]
    pub magic_damage_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.prayer_bonus")]
    pub prayer_bonus: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.weapon_attack_speed")]
    pub weapon_attack_speed: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.weapon_attack_range")]
    pub weapon_attack_range: Option<Value>,
    #[serde(default, rename = "infobox_bonuses.combat_style")]
    pub combat_style: Option<Value>,
}

/// Identity keys are text; `null` or any other JSON type reads as an empty
/// key, which extraction rejects as malformed.
fn lenient_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(key) => Ok(key),
        _ => Ok(String::new()),
    }
}

/// First element of a multi-valued field; scalars count as one element.
pub fn first_value(value: Option<&Value>) -> Option<&Value> {
    match value? {
        Value::Array(items) => items.first(),
        Value::Null => None,
        other => Some(other),
    }
}

/// Last element of a multi-valued field; scalars count as one element.
pub fn last_value(value: Option<&Value>) -> Option<&Value> {
    match value? {
        Value::Array(items) => items.last(),
        Value::Null => None,
        other => Some(other),
    }
}

/// Render a scalar as text: strings verbatim, numbers and booleans in their
/// JSON form. Arrays, objects, and `null` have no text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Coerce a number or numeric string into an integer.
///
/// Strings are trimmed and may carry a leading `+`. Whole floats are
/// accepted; fractional values are not.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(text) => {
            let trimmed = text.trim();
            let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
            unsigned.parse::<i64>().ok()
        }
        _ => None,
    }
}

/// Coerce a number or numeric string into a float.
pub fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let trimmed = text.trim();
            let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
            unsigned.parse::<f64>().ok()
        }
        _ => None,
    }
}
