//! Candidate selection.
//!
//! Decides which records a run is allowed to rewrite. Weapons come from the
//! target plugins plus any vanilla weapon a target plugin overrides; perks
//! come from the vanilla baseline plugins, resolved to whatever currently
//! wins for them.

use crate::store::{FormId, LoadOrder, PluginName, StoreError, WeaponRecord};
use std::collections::HashSet;

/// The baseline plugin whose weapons count as "vanilla" for renaming.
pub const WEAPON_BASELINE: &str = "Skyrim.esm";

/// Plugins whose perks are eligible for description rewriting.
pub const PERK_BASELINES: [&str; 5] = [
    "Skyrim.esm",
    "Update.esm",
    "Dawnguard.esm",
    "HearthFires.esm",
    "Dragonborn.esm",
];

/// Winning weapons eligible for renaming.
///
/// A weapon qualifies if it originates from one of the target plugins, or
/// if it originates from the vanilla baseline *and* some target plugin
/// carries an override for it. Untouched vanilla weapons are left alone.
pub fn name_candidates(
    load_order: &dyn LoadOrder,
    targets: &[PluginName],
) -> Result<Vec<WeaponRecord>, StoreError> {
    let baseline = PluginName::new(WEAPON_BASELINE);

    let mut touched_vanilla: HashSet<FormId> = HashSet::new();
    for target in targets {
        for weapon in load_order.plugin_weapons(target)? {
            if weapon.form.plugin == baseline {
                touched_vanilla.insert(weapon.form);
            }
        }
    }

    let candidates = load_order
        .winning_weapons()?
        .into_iter()
        .filter(|weapon| {
            targets.contains(&weapon.form.plugin)
                || (weapon.form.plugin == baseline && touched_vanilla.contains(&weapon.form))
        })
        .collect();
    Ok(candidates)
}

/// Forms of every perk the baseline plugins define, deduplicated, in
/// enumeration order. The caller resolves each to its winning override and
/// skips the ones that no longer resolve.
pub fn baseline_perk_forms(load_order: &dyn LoadOrder) -> Result<Vec<FormId>, StoreError> {
    let mut seen: HashSet<FormId> = HashSet::new();
    let mut forms = Vec::new();
    for baseline in PERK_BASELINES {
        let baseline = PluginName::new(baseline);
        if !load_order.contains_plugin(&baseline) {
            continue;
        }
        for perk in load_order.plugin_perks(&baseline)? {
            if seen.insert(perk.form.clone()) {
                forms.push(perk.form);
            }
        }
    }
    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryLoadOrder, PerkRecord, PluginData};

    fn weapon(plugin: &str, id: u32, name: &str) -> WeaponRecord {
        WeaponRecord {
            form: FormId::new(plugin, id),
            editor_id: None,
            name: Some(name.to_string()),
        }
    }

    fn perk(plugin: &str, id: u32) -> PerkRecord {
        PerkRecord {
            form: FormId::new(plugin, id),
            editor_id: None,
            description: Some("text".to_string()),
        }
    }

    fn targets() -> Vec<PluginName> {
        vec![PluginName::new("PrvtI_HeavyArmory.esp")]
    }

    #[test]
    fn target_plugin_weapons_are_candidates() {
        let load_order = InMemoryLoadOrder::new(vec![PluginData::new("PrvtI_HeavyArmory.esp")
            .with_weapons(vec![weapon("PrvtI_HeavyArmory.esp", 1, "Iron Spear")])]);

        let candidates = name_candidates(&load_order, &targets()).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn vanilla_weapon_is_a_candidate_only_while_overridden() {
        let vanilla = weapon(WEAPON_BASELINE, 0x100, "Iron Sword");
        let overridden = weapon(WEAPON_BASELINE, 0x100, "Iron Sword (rebalanced)");

        let with_override = InMemoryLoadOrder::new(vec![
            PluginData::new(WEAPON_BASELINE).with_weapons(vec![vanilla.clone()]),
            PluginData::new("PrvtI_HeavyArmory.esp").with_weapons(vec![overridden.clone()]),
        ]);
        let candidates = name_candidates(&with_override, &targets()).unwrap();
        assert_eq!(candidates.len(), 1);
        // The winning text is the override's, not the baseline's.
        assert_eq!(
            candidates[0].name.as_deref(),
            Some("Iron Sword (rebalanced)")
        );

        // Same load order minus the override: the vanilla weapon drops out.
        let without_override = InMemoryLoadOrder::new(vec![
            PluginData::new(WEAPON_BASELINE).with_weapons(vec![vanilla]),
            PluginData::new("PrvtI_HeavyArmory.esp"),
        ]);
        let candidates = name_candidates(&without_override, &targets()).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn unrelated_plugin_weapons_are_not_candidates() {
        let load_order = InMemoryLoadOrder::new(vec![
            PluginData::new("SomeOtherMod.esp")
                .with_weapons(vec![weapon("SomeOtherMod.esp", 5, "Glass Spear")]),
        ]);
        let candidates = name_candidates(&load_order, &targets()).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn target_matching_ignores_case() {
        let load_order = InMemoryLoadOrder::new(vec![PluginData::new("prvti_heavyarmory.esp")
            .with_weapons(vec![weapon("PRVTI_HEAVYARMORY.ESP", 1, "Iron Spear")])]);
        let candidates = name_candidates(&load_order, &targets()).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn perk_forms_come_from_all_baselines_without_duplicates() {
        let load_order = InMemoryLoadOrder::new(vec![
            PluginData::new("Skyrim.esm")
                .with_perks(vec![perk("Skyrim.esm", 1), perk("Skyrim.esm", 2)]),
            // Update.esm overrides one vanilla perk and adds one of its own.
            PluginData::new("Update.esm")
                .with_perks(vec![perk("Skyrim.esm", 2), perk("Update.esm", 3)]),
        ]);

        let forms = baseline_perk_forms(&load_order).unwrap();
        assert_eq!(
            forms,
            vec![
                FormId::new("Skyrim.esm", 1),
                FormId::new("Skyrim.esm", 2),
                FormId::new("Update.esm", 3),
            ]
        );
    }

    #[test]
    fn non_baseline_perks_are_ignored() {
        let load_order = InMemoryLoadOrder::new(vec![
            PluginData::new("Skyrim.esm").with_perks(vec![perk("Skyrim.esm", 1)]),
            PluginData::new("SomeMod.esp").with_perks(vec![perk("SomeMod.esp", 9)]),
        ]);
        let forms = baseline_perk_forms(&load_order).unwrap();
        assert_eq!(forms, vec![FormId::new("Skyrim.esm", 1)]);
    }
}
