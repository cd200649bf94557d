use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Composite source key (`page_name_sub`) that tells item variants apart.
///
/// Two rows with the same display name but different charge states or
/// recolors carry different identity keys; two rows with the same key are
/// the same catalog entry.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(pub String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IdentityKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IdentityKey {
    fn from(value: &str) -> Self {
        IdentityKey(value.to_string())
    }
}

/// Equipment slot an item occupies.
///
/// Known slots keep serialization consistent; `Other` preserves slots the
/// wiki may introduce later. The two-handed marker never appears here: it is
/// folded into `Weapon` plus the `is_two_handed` flag during extraction.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum EquipmentSlot {
    Head,
    Cape,
    Neck,
    Ammo,
    Weapon,
    Body,
    Shield,
    Legs,
    Hands,
    Feet,
    Ring,
    Other(String),
}

impl Serialize for EquipmentSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EquipmentSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl EquipmentSlot {
    pub fn as_str(&self) -> &str {
        match self {
            EquipmentSlot::Head => "head",
            EquipmentSlot::Cape => "cape",
            EquipmentSlot::Neck => "neck",
            EquipmentSlot::Ammo => "ammo",
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Body => "body",
            EquipmentSlot::Shield => "shield",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Hands => "hands",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Ring => "ring",
            EquipmentSlot::Other(value) => value.as_str(),
        }
    }

    /// Map a lowercase slot name onto a known slot.
    pub fn from_str(value: &str) -> Self {
        match value {
            "head" => EquipmentSlot::Head,
            "cape" => EquipmentSlot::Cape,
            "neck" => EquipmentSlot::Neck,
            "ammo" => EquipmentSlot::Ammo,
            "weapon" => EquipmentSlot::Weapon,
            "body" => EquipmentSlot::Body,
            "shield" => EquipmentSlot::Shield,
            "legs" => EquipmentSlot::Legs,
            "hands" => EquipmentSlot::Hands,
            "feet" => EquipmentSlot::Feet,
            "ring" => EquipmentSlot::Ring,
            other => EquipmentSlot::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
