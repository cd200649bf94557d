//! Name and context based exclusions applied after version resolution.

use std::fmt;

/// Known broken, duplicate, or unreleased wiki entries.
const DENIED_NAMES: &[&str] = &[
    "The dogsword",
    "Drygore blowpipe",
    "Amulet of the monarchs",
    "Emperor ring",
    "Devil's element",
    "Nature's reprisal",
    "Gloves of the damned",
    "Crystal blessing",
    "Sunlight spear",
    "Sunlit bracers",
    "Thunder khopesh",
    "Thousand-dragon ward",
    "Arcane grimoire",
    "Wristbands of the arena",
    "Wristbands of the arena (i)",
    "Armadyl chainskirt (or)",
    "Armadyl chestplate (or)",
    "Armadyl helmet (or)",
    "Dagon'hai hat (or)",
    "Dagon'hai robe bottom (or)",
    "Dagon'hai robe top (or)",
    "Dragon warhammer (or)",
    "Centurion cuirass",
    "Ruinous powers (item)",
    "Battlehat",
    "Zaryte bow",
];

/// Name fragments that mark restricted or unobtainable copies of items.
const NAME_MARKERS: &[&str] = &["(Last Man Standing)", "(unobtainable item)", "historical"];

const CONTEXTUAL: &[ContextualExclusion] = &[ContextualExclusion {
    name_contains: "Keris partisan of amascut",
    key_contains: "Outside ToA",
}];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Drop an item only when its identity key places it in a duplicate context.
pub struct ContextualExclusion {
    pub name_contains: &'static str,
    pub key_contains: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExclusionReason {
    DenyListed,
    NameMarker(&'static str),
    Context(&'static str),
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::DenyListed => write!(f, "deny-listed name"),
            ExclusionReason::NameMarker(marker) => write!(f, "name contains '{marker}'"),
            ExclusionReason::Context(marker) => write!(f, "identity key contains '{marker}'"),
        }
    }
}

#[derive(Clone, Debug)]
/// Static skip rules for candidates that must never reach the catalog.
pub struct ExclusionRules {
    denied_names: &'static [&'static str],
    name_markers: &'static [&'static str],
    contextual: &'static [ContextualExclusion],
}

impl ExclusionRules {
    pub fn new(
        denied_names: &'static [&'static str],
        name_markers: &'static [&'static str],
        contextual: &'static [ContextualExclusion],
    ) -> Self {
        Self {
            denied_names,
            name_markers,
            contextual,
        }
    }

    pub fn standard() -> Self {
        Self::new(DENIED_NAMES, NAME_MARKERS, CONTEXTUAL)
    }

    /// Returns why the candidate is excluded, or `None` to keep it.
    pub fn check(&self, name: &str, key: &str) -> Option<ExclusionReason> {
        if self.denied_names.contains(&name) {
            return Some(ExclusionReason::DenyListed);
        }
        if let Some(marker) = self.name_markers.iter().find(|m| name.contains(*m)) {
            return Some(ExclusionReason::NameMarker(*marker));
        }
        self.contextual
            .iter()
            .find(|rule| name.contains(rule.name_contains) && key.contains(rule.key_contains))
            .map(|rule| ExclusionReason::Context(rule.key_contains))
    }
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self::standard()
    }
}
