//! Two-handed weapon normalization.
//!
//! The wiki tags two-handed weapons with a dedicated `2h` slot. The catalog
//! only knows `weapon` and carries handedness as a separate flag.

use crate::catalog::EquipmentSlot;

/// Slot marker the source uses for two-handed weapons.
pub const TWO_HANDED_MARKER: &str = "2h";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Normalized slot plus the tri-state handedness flag.
pub struct SlotAssignment {
    pub slot: EquipmentSlot,
    pub is_two_handed: Option<bool>,
}

/// Resolve a lowercase source slot name into a catalog slot.
pub fn normalize_slot(marker: &str) -> SlotAssignment {
    match marker {
        TWO_HANDED_MARKER => SlotAssignment {
            slot: EquipmentSlot::Weapon,
            is_two_handed: Some(true),
        },
        "weapon" => SlotAssignment {
            slot: EquipmentSlot::Weapon,
            is_two_handed: Some(false),
        },
        other => SlotAssignment {
            slot: EquipmentSlot::from_str(other),
            is_two_handed: None,
        },
    }
}
