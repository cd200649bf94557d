//! Version resolution: which wiki "versions" survive as catalog entries.
//!
//! The wiki models charge states, recolors, and quest stages as versions of
//! one page. The catalog keeps one entry per functionally distinct item, so
//! degraded or transient versions are dropped and the clean state becomes the
//! unversioned representative.
//!
//! Rules are an ordered table evaluated against the version string the row
//! arrived with. A matching discard rule ends evaluation; collapse rules
//! accumulate and clear `version` once every rule has been checked.

use crate::catalog::Equipment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionAction {
    /// Drop the row entirely.
    Discard,
    /// Keep the row and clear its version.
    Collapse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which item names a rule applies to.
pub enum NameMatch {
    Any,
    /// Exact, case-sensitive name membership.
    OneOf(&'static [&'static str]),
    /// Case-sensitive substring of the name.
    Contains(&'static str),
}

impl NameMatch {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::Any => true,
            NameMatch::OneOf(names) => names.contains(&name),
            NameMatch::Contains(fragment) => name.contains(fragment),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One row of the rule table: names × version tokens → action.
pub struct VersionRule {
    pub label: &'static str,
    pub names: NameMatch,
    pub versions: &'static [&'static str],
    pub action: VersionAction,
}

impl VersionRule {
    pub fn matches(&self, name: &str, version: &str) -> bool {
        self.versions.contains(&version) && self.names.matches(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// What the resolver did to a candidate.
pub enum VersionOutcome {
    /// No version, or no rule matched.
    Unchanged,
    /// Version cleared; carries the first collapse rule that matched.
    Collapsed(&'static str),
    /// Candidate must be dropped; carries the discard rule that matched.
    Discarded(&'static str),
}

const UNCHARGED_NOT_CATALOGED: &[&str] = &[
    "Accursed sceptre",
    "Accursed sceptre (a)",
    "Corrupted tumeken's shadow",
    "Craw's bow",
    "Holy sanguinesti staff",
    "Sanguinesti staff",
    "Thammaron's sceptre",
    "Thammaron's sceptre (a)",
    "Trident of the seas",
    "Trident of the seas (e)",
    "Trident of the swamp",
    "trident of the swamp (e)",
    "Tumeken's shadow",
    "Ursine chainmace",
    "Viggora's chainmace",
    "Warped sceptre",
    "Webweaver bow",
];

const INACTIVE_NOT_CATALOGED: &[&str] = &[
    "Blade of saeldor",
    "Bow of faerdhinen",
    "Crystal body",
    "Crystal helm",
    "Crystal legs",
    "Crystal shield",
];

const BLACK_MASK_TIERS: &[&str] = &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

static STANDARD_RULES: &[VersionRule] = &[
    VersionRule {
        label: "nightmare zone variant",
        names: NameMatch::Any,
        versions: &["Nightmare Zone"],
        action: VersionAction::Collapse,
    },
    VersionRule {
        label: "degradation charge state",
        names: NameMatch::Any,
        versions: &["Broken", "0", "25", "50", "75", "100"],
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "new or used",
        names: NameMatch::Any,
        versions: &["New", "Used"],
        action: VersionAction::Collapse,
    },
    VersionRule {
        label: "blowpipe charge state",
        names: NameMatch::OneOf(&["Toxic blowpipe"]),
        versions: &["Empty", "Charged"],
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "uncharged powered weapon",
        names: NameMatch::OneOf(UNCHARGED_NOT_CATALOGED),
        versions: &["Uncharged"],
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "inactive crystal equipment",
        names: NameMatch::OneOf(INACTIVE_NOT_CATALOGED),
        versions: &["Inactive"],
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "black mask charge tier",
        names: NameMatch::Contains("Black mask"),
        versions: BLACK_MASK_TIERS,
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "uncharged black mask",
        names: NameMatch::Contains("Black mask"),
        versions: &["Uncharged"],
        action: VersionAction::Collapse,
    },
    VersionRule {
        label: "locked or broken",
        names: NameMatch::Any,
        versions: &["Locked", "Broken"],
        action: VersionAction::Discard,
    },
    VersionRule {
        label: "clean state",
        names: NameMatch::Any,
        versions: &["Normal", "Restored", "Undamaged"],
        action: VersionAction::Collapse,
    },
];

#[derive(Clone, Debug)]
/// Ordered version rule table.
pub struct VersionRules {
    rules: Vec<VersionRule>,
}

impl VersionRules {
    pub fn new(rules: Vec<VersionRule>) -> Self {
        Self { rules }
    }

    /// The rule table used for the published catalog.
    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    /// Decide what happens to `equipment`'s version, rewriting it in place
    /// when a collapse rule applies.
    ///
    /// Candidates without a version are left alone, which makes resolving an
    /// already-resolved candidate a no-op.
    pub fn resolve(&self, equipment: &mut Equipment) -> VersionOutcome {
        let Some(version) = equipment.version.as_deref() else {
            return VersionOutcome::Unchanged;
        };

        let mut collapsed_by: Option<&'static str> = None;
        for rule in &self.rules {
            if !rule.matches(&equipment.name, version) {
                continue;
            }
            match rule.action {
                VersionAction::Discard => return VersionOutcome::Discarded(rule.label),
                VersionAction::Collapse => {
                    collapsed_by.get_or_insert(rule.label);
                }
            }
        }

        match collapsed_by {
            Some(label) => {
                equipment.version = None;
                VersionOutcome::Collapsed(label)
            }
            None => VersionOutcome::Unchanged,
        }
    }
}

impl Default for VersionRules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Bonuses, EquipmentSlot};

    fn item(name: &str, version: Option<&str>) -> Equipment {
        Equipment {
            name: name.to_string(),
            id: 1,
            version: version.map(str::to_string),
            slot: EquipmentSlot::Weapon,
            image: String::new(),
            speed: None,
            category: None,
            bonuses: Bonuses::default(),
            is_two_handed: Some(false),
            attack_range: None,
        }
    }

    fn resolve(name: &str, version: &str) -> (VersionOutcome, Option<String>) {
        let mut eq = item(name, Some(version));
        let outcome = VersionRules::standard().resolve(&mut eq);
        (outcome, eq.version)
    }

    #[test]
    fn nightmare_zone_becomes_base_form() {
        let (outcome, version) = resolve("Dharok's greataxe", "Nightmare Zone");
        assert_eq!(outcome, VersionOutcome::Collapsed("nightmare zone variant"));
        assert_eq!(version, None);
    }

    #[test]
    fn charge_percentages_and_broken_are_dropped() {
        for token in ["Broken", "0", "25", "50", "75", "100"] {
            let (outcome, _) = resolve("Dharok's greataxe", token);
            assert_eq!(outcome, VersionOutcome::Discarded("degradation charge state"));
        }
        // Exact token match only.
        let (outcome, version) = resolve("Dharok's greataxe", "100 charges");
        assert_eq!(outcome, VersionOutcome::Unchanged);
        assert_eq!(version.as_deref(), Some("100 charges"));
    }

    #[test]
    fn new_used_and_clean_states_collapse() {
        for token in ["New", "Used", "Normal", "Restored", "Undamaged"] {
            let (outcome, version) = resolve("Some Staff", token);
            assert!(matches!(outcome, VersionOutcome::Collapsed(_)), "{token}");
            assert_eq!(version, None);
        }
    }

    #[test]
    fn named_item_discards() {
        assert!(matches!(
            resolve("Toxic blowpipe", "Charged").0,
            VersionOutcome::Discarded("blowpipe charge state")
        ));
        assert!(matches!(
            resolve("Toxic blowpipe", "Empty").0,
            VersionOutcome::Discarded(_)
        ));
        assert!(matches!(
            resolve("Trident of the seas", "Uncharged").0,
            VersionOutcome::Discarded("uncharged powered weapon")
        ));
        assert!(matches!(
            resolve("Crystal helm", "Inactive").0,
            VersionOutcome::Discarded("inactive crystal equipment")
        ));
        // Name lists are exact and case-sensitive.
        assert_eq!(
            resolve("Trident of the swamp (e)", "Uncharged").0,
            VersionOutcome::Unchanged
        );
        assert!(matches!(
            resolve("trident of the swamp (e)", "Uncharged").0,
            VersionOutcome::Discarded(_)
        ));
        assert_eq!(resolve("Abyssal whip", "Charged").0, VersionOutcome::Unchanged);
    }

    #[test]
    fn black_mask_family() {
        for tier in ["1", "5", "10"] {
            assert_eq!(
                resolve("Black mask (i)", tier).0,
                VersionOutcome::Discarded("black mask charge tier")
            );
        }
        let (outcome, version) = resolve("Black mask (i)", "Uncharged");
        assert_eq!(outcome, VersionOutcome::Collapsed("uncharged black mask"));
        assert_eq!(version, None);
        // Tier tokens only matter for the mask family.
        assert_eq!(resolve("Rune platebody", "7").0, VersionOutcome::Unchanged);
        // Other uncharged items keep their version.
        let (outcome, version) = resolve("Serpentine helm", "Uncharged");
        assert_eq!(outcome, VersionOutcome::Unchanged);
        assert_eq!(version.as_deref(), Some("Uncharged"));
    }

    #[test]
    fn locked_is_dropped() {
        assert_eq!(
            resolve("Infernal cape", "Locked").0,
            VersionOutcome::Discarded("locked or broken")
        );
    }

    #[test]
    fn resolving_twice_is_a_no_op() {
        let rules = VersionRules::standard();
        let mut eq = item("Some Staff", Some("Normal"));
        rules.resolve(&mut eq);
        let settled = eq.clone();
        assert_eq!(rules.resolve(&mut eq), VersionOutcome::Unchanged);
        assert_eq!(eq, settled);
    }

    #[test]
    fn substitutable_rule_table() {
        static RULES: &[VersionRule] = &[VersionRule {
            label: "test",
            names: NameMatch::Contains("Staff"),
            versions: &["Normal"],
            action: VersionAction::Discard,
        }];
        let rules = VersionRules::new(RULES.to_vec());
        let mut eq = item("Some Staff", Some("Normal"));
        assert_eq!(rules.resolve(&mut eq), VersionOutcome::Discarded("test"));
        let mut eq = item("Some Sword", Some("Broken"));
        assert_eq!(rules.resolve(&mut eq), VersionOutcome::Unchanged);
    }
}
