//! The substitution tables.
//!
//! Two independent ordered rule sets drive the patcher:
//!
//! - [`NAME_RULES`] rewrites weapon display names. Evaluation is
//!   first-match-wins, so compound terms sit before their substrings
//!   (`Dai-Katana` before `Katana`). Each rule is tagged with the
//!   [`Category`] that gates it, so a disabled category skips its rules
//!   without consuming the match slot.
//! - [`DESCRIPTION_RULES`] rewrites perk descriptions. Every rule in the
//!   list is applied in order across the same string; already-rewritten
//!   spans are protected by the region tracker. Several entries map a
//!   phrase to itself on purpose: they claim the span early so a later,
//!   broader rule cannot clobber a phrase that is already correct.
//!
//! Both tables are static data. Order within a table is semantically
//! significant and must not be re-sorted.

use crate::config::Settings;

/// Weapon category a name rule belongs to. Rules are skipped when their
/// category is disabled in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Spears,
    Halberds,
    Quarterstaffs,
    BladesSwords,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Spears => "spears",
            Category::Halberds => "halberds",
            Category::Quarterstaffs => "quarterstaffs",
            Category::BladesSwords => "blades-swords",
        }
    }
}

/// A single name substitution, gated by its category.
#[derive(Debug, Clone, Copy)]
pub struct NameRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub category: Category,
}

/// A single description substitution. Ungated; applied in table order.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

const fn name(pattern: &'static str, replacement: &'static str, category: Category) -> NameRule {
    NameRule {
        pattern,
        replacement,
        category,
    }
}

const fn desc(pattern: &'static str, replacement: &'static str) -> DescriptionRule {
    DescriptionRule {
        pattern,
        replacement,
    }
}

/// Name rules, first-match-wins order.
///
/// The lowercase `spear`/`halberd`/`quarterstaff` variants are unreachable
/// (word matching is already case-insensitive, so the capitalized entry
/// earlier in the table always wins) but are kept to preserve the exact
/// historical table order.
pub static NAME_RULES: &[NameRule] = &[
    name("Spear", "Half pike", Category::Spears),
    name("Spears", "Half pikes", Category::Spears),
    name("spear", "half pike", Category::Spears),
    name("spears", "half pikes", Category::Spears),
    name("Halberd", "Poleaxe", Category::Halberds),
    name("Halberds", "Poleaxes", Category::Halberds),
    name("halberd", "poleaxe", Category::Halberds),
    name("halberds", "poleaxes", Category::Halberds),
    name("Quarterstaff", "Shortstaff", Category::Quarterstaffs),
    name("Quarterstaffs", "Shortstaffs", Category::Quarterstaffs),
    name("quarterstaff", "shortstaff", Category::Quarterstaffs),
    name("quarterstaffs", "shortstaffs", Category::Quarterstaffs),
    // Blades weapons, longer names first.
    name("Dai-Katana", "Greatsword", Category::BladesSwords),
    name("Wakizashi", "Shortsword", Category::BladesSwords),
    name("Katana", "Sword", Category::BladesSwords),
    name("Tanto", "Dagger", Category::BladesSwords),
];

/// Description rules, applied sequentially in this exact order.
pub static DESCRIPTION_RULES: &[DescriptionRule] = &[
    // Two-handed. The self-mapping entries claim already-correct phrases.
    desc(
        "greatswords and two-handed pole weapons",
        "greatswords and two-handed pole weapons",
    ),
    desc("greatswords", "greatswords and two-handed pole weapons"),
    desc("Greatswords", "Greatswords and two-handed pole weapons"),
    desc(
        "greatsword and two-handed pole weapon",
        "greatsword and two-handed pole weapon",
    ),
    desc("greatsword", "greatsword and two-handed pole weapon"),
    desc("Greatsword", "Greatsword and two-handed pole weapon"),
    // One-handed.
    desc(
        "swords and daggers",
        "one-handed swords, one-handed spears, claws and daggers",
    ),
    desc(
        "Swords and daggers",
        "One-handed swords, one-handed spears, claws and daggers",
    ),
    desc("swords", "one-handed swords and spears"),
    desc("Swords", "One-handed swords and spears"),
    desc("sword", "one-handed sword and spear"),
    desc("Sword", "One-handed sword and spear"),
    desc("mace", "one-handed blunt weapon"),
    desc("Mace", "One-handed blunt weapon"),
    desc("War Axe", "One-handed axe"),
    desc("War axe", "One-handed axe"),
    desc("war axe", "one-handed axe"),
    // Daggers.
    desc("daggers", "claws and daggers"),
    desc("Daggers", "Claws and daggers"),
    desc("dagger", "claw or dagger"),
    desc("Dagger", "Claw or dagger"),
];

/// Per-category enable flags, resolved from settings once per run.
#[derive(Debug, Clone, Copy)]
pub struct CategoryToggles {
    pub spears: bool,
    pub halberds: bool,
    pub quarterstaffs: bool,
    pub blades_swords: bool,
}

impl CategoryToggles {
    /// Everything enabled; the settings defaults.
    pub fn all_enabled() -> Self {
        Self {
            spears: true,
            halberds: true,
            quarterstaffs: true,
            blades_swords: true,
        }
    }

    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Spears => self.spears,
            Category::Halberds => self.halberds,
            Category::Quarterstaffs => self.quarterstaffs,
            Category::BladesSwords => self.blades_swords,
        }
    }
}

impl From<&Settings> for CategoryToggles {
    fn from(settings: &Settings) -> Self {
        Self {
            spears: settings.rename_spears,
            halberds: settings.rename_halberds,
            quarterstaffs: settings.rename_quarterstaffs,
            blades_swords: settings.rename_blades_swords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_blade_terms_precede_their_substrings() {
        let dai_katana = NAME_RULES
            .iter()
            .position(|rule| rule.pattern == "Dai-Katana")
            .unwrap();
        let katana = NAME_RULES
            .iter()
            .position(|rule| rule.pattern == "Katana")
            .unwrap();
        assert!(dai_katana < katana);
    }

    #[test]
    fn claim_rules_precede_the_rules_they_guard() {
        let claim = DESCRIPTION_RULES
            .iter()
            .position(|rule| rule.pattern == "greatswords and two-handed pole weapons")
            .unwrap();
        let broad = DESCRIPTION_RULES
            .iter()
            .position(|rule| rule.pattern == "greatswords")
            .unwrap();
        assert!(claim < broad);
    }

    #[test]
    fn every_name_rule_carries_a_category() {
        // The gate is declared per rule in the table, not inferred from the
        // rule text, so a vocabulary change cannot silently detach a rule
        // from its toggle.
        for rule in NAME_RULES {
            assert!(!rule.pattern.is_empty());
            assert!(!rule.replacement.is_empty());
            let _ = rule.category.label();
        }
    }

    #[test]
    fn toggles_disable_exactly_their_category() {
        let toggles = CategoryToggles {
            spears: false,
            ..CategoryToggles::all_enabled()
        };
        assert!(!toggles.enabled(Category::Spears));
        assert!(toggles.enabled(Category::Halberds));
        assert!(toggles.enabled(Category::Quarterstaffs));
        assert!(toggles.enabled(Category::BladesSwords));
    }
}
