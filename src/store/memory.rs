//! In-memory load order with last-wins override resolution.

use crate::store::{FormId, LoadOrder, PerkRecord, PluginName, StoreError, WeaponRecord};
use std::collections::BTreeMap;

/// One plugin's contribution to the load order: the records it defines or
/// overrides, in file order.
#[derive(Debug, Clone)]
pub struct PluginData {
    pub name: PluginName,
    pub weapons: Vec<WeaponRecord>,
    pub perks: Vec<PerkRecord>,
}

impl PluginData {
    pub fn new(name: impl Into<PluginName>) -> Self {
        Self {
            name: name.into(),
            weapons: Vec::new(),
            perks: Vec::new(),
        }
    }

    pub fn with_weapons(mut self, weapons: Vec<WeaponRecord>) -> Self {
        self.weapons = weapons;
        self
    }

    pub fn with_perks(mut self, perks: Vec<PerkRecord>) -> Self {
        self.perks = perks;
        self
    }
}

/// A fully materialized load order. Plugins are held in priority order:
/// when two plugins carry a record with the same form, the later plugin's
/// copy wins.
#[derive(Debug, Default)]
pub struct InMemoryLoadOrder {
    plugins: Vec<PluginData>,
}

impl InMemoryLoadOrder {
    pub fn new(plugins: Vec<PluginData>) -> Self {
        Self { plugins }
    }

    pub fn push(&mut self, plugin: PluginData) {
        self.plugins.push(plugin);
    }

    pub fn plugins(&self) -> &[PluginData] {
        &self.plugins
    }

    fn find_plugin(&self, name: &PluginName) -> Option<&PluginData> {
        self.plugins.iter().find(|plugin| &plugin.name == name)
    }
}

impl LoadOrder for InMemoryLoadOrder {
    fn contains_plugin(&self, plugin: &PluginName) -> bool {
        self.find_plugin(plugin).is_some()
    }

    fn winning_weapons(&self) -> Result<Vec<WeaponRecord>, StoreError> {
        let mut winning: BTreeMap<FormId, WeaponRecord> = BTreeMap::new();
        for plugin in &self.plugins {
            for weapon in &plugin.weapons {
                winning.insert(weapon.form.clone(), weapon.clone());
            }
        }
        Ok(winning.into_values().collect())
    }

    fn plugin_weapons(&self, plugin: &PluginName) -> Result<Vec<WeaponRecord>, StoreError> {
        Ok(self
            .find_plugin(plugin)
            .map(|data| data.weapons.clone())
            .unwrap_or_default())
    }

    fn plugin_perks(&self, plugin: &PluginName) -> Result<Vec<PerkRecord>, StoreError> {
        Ok(self
            .find_plugin(plugin)
            .map(|data| data.perks.clone())
            .unwrap_or_default())
    }

    fn resolve_winning_perk(&self, form: &FormId) -> Result<Option<PerkRecord>, StoreError> {
        // Later plugins win, so scan back-to-front and take the first hit.
        for plugin in self.plugins.iter().rev() {
            if let Some(perk) = plugin.perks.iter().find(|perk| &perk.form == form) {
                return Ok(Some(perk.clone()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(form: FormId, name: &str) -> WeaponRecord {
        WeaponRecord {
            form,
            editor_id: None,
            name: Some(name.to_string()),
        }
    }

    fn perk(form: FormId, description: &str) -> PerkRecord {
        PerkRecord {
            form,
            editor_id: None,
            description: Some(description.to_string()),
        }
    }

    #[test]
    fn later_plugin_wins_for_same_form() {
        let form = FormId::new("Skyrim.esm", 0x100);
        let load_order = InMemoryLoadOrder::new(vec![
            PluginData::new("Skyrim.esm").with_weapons(vec![weapon(form.clone(), "Iron Spear")]),
            PluginData::new("PrvtI_HeavyArmory.esp")
                .with_weapons(vec![weapon(form.clone(), "Iron Spear (balanced)")]),
        ]);

        let winning = load_order.winning_weapons().unwrap();
        assert_eq!(winning.len(), 1);
        assert_eq!(winning[0].name.as_deref(), Some("Iron Spear (balanced)"));
    }

    #[test]
    fn resolve_winning_perk_prefers_latest_override() {
        let form = FormId::new("Skyrim.esm", 0x200);
        let load_order = InMemoryLoadOrder::new(vec![
            PluginData::new("Skyrim.esm").with_perks(vec![perk(form.clone(), "base text")]),
            PluginData::new("SomeMod.esp").with_perks(vec![perk(form.clone(), "modded text")]),
        ]);

        let winning = load_order.resolve_winning_perk(&form).unwrap().unwrap();
        assert_eq!(winning.description.as_deref(), Some("modded text"));
    }

    #[test]
    fn unknown_form_resolves_to_none() {
        let load_order = InMemoryLoadOrder::default();
        let resolved = load_order
            .resolve_winning_perk(&FormId::new("Skyrim.esm", 0x999))
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn plugin_lookup_is_case_insensitive() {
        let load_order =
            InMemoryLoadOrder::new(vec![PluginData::new("PrvtI_HeavyArmory.esp")]);
        assert!(load_order.contains_plugin(&PluginName::new("prvti_heavyarmory.esp")));
        assert!(!load_order.contains_plugin(&PluginName::new("Other.esp")));
    }
}
