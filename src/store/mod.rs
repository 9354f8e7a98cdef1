//! The record-store boundary.
//!
//! The rewrite core never touches plugin files itself. It consumes an
//! override-resolved view of a load order through the [`LoadOrder`] trait
//! and writes changed records into a [`PatchMod`], an in-memory override
//! patch that the snapshot layer persists. Binary plugin formats stay on
//! the far side of this boundary; [`memory::InMemoryLoadOrder`] backs both
//! the JSON snapshot loader and the tests.

pub mod memory;
pub mod snapshot;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use thiserror::Error;

pub use memory::{InMemoryLoadOrder, PluginData};

/// A plugin file name, e.g. `PrvtI_HeavyArmory.esp`.
///
/// Load orders are case-preserving but case-insensitive: `skyrim.esm` and
/// `Skyrim.esm` name the same plugin. Equality, ordering and hashing all
/// fold ASCII case; the original spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginName(String);

impl PluginName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for PluginName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for PluginName {}

impl PartialOrd for PluginName {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PluginName {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl Hash for PluginName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            byte.to_ascii_lowercase().hash(state);
        }
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PluginName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PluginName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identity of a record: the plugin that originally defined it plus its
/// local numeric id. Overriding copies of a record in later plugins carry
/// the same `FormId` as the original.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormId {
    pub plugin: PluginName,
    pub id: u32,
}

impl FormId {
    pub fn new(plugin: impl Into<PluginName>, id: u32) -> Self {
        Self {
            plugin: plugin.into(),
            id,
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:06X}", self.plugin, self.id)
    }
}

/// A weapon record, or the slice of one this patcher cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub form: FormId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A perk record; only the description is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerkRecord {
    pub form: FormId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WeaponRecord {
    pub fn display_id(&self) -> String {
        self.editor_id
            .clone()
            .unwrap_or_else(|| self.form.to_string())
    }
}

impl PerkRecord {
    pub fn display_id(&self) -> String {
        self.editor_id
            .clone()
            .unwrap_or_else(|| self.form.to_string())
    }
}

/// Errors from a load-order backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record {form} not present in load order")]
    UnknownForm { form: FormId },
}

/// An override-resolved view of a load order.
///
/// Implementations resolve "winning" records themselves; the patcher only
/// distinguishes winning views from raw per-plugin record lists.
pub trait LoadOrder {
    /// Whether the plugin is present in the active load order.
    fn contains_plugin(&self, plugin: &PluginName) -> bool;

    /// Every weapon, resolved to its winning override.
    fn winning_weapons(&self) -> Result<Vec<WeaponRecord>, StoreError>;

    /// The raw weapon records a single plugin defines or overrides.
    fn plugin_weapons(&self, plugin: &PluginName) -> Result<Vec<WeaponRecord>, StoreError>;

    /// The raw perk records a single plugin defines or overrides.
    fn plugin_perks(&self, plugin: &PluginName) -> Result<Vec<PerkRecord>, StoreError>;

    /// Resolve a form to its current winning perk record, if any.
    fn resolve_winning_perk(&self, form: &FormId) -> Result<Option<PerkRecord>, StoreError>;
}

/// The override patch under construction.
///
/// Records are added lazily: `weapon_override` materializes an editable
/// copy of the winning record on first touch and returns the same copy on
/// every later call, so a record is never duplicated however many rules
/// touch it.
#[derive(Debug, Default)]
pub struct PatchMod {
    weapons: BTreeMap<FormId, WeaponRecord>,
    perks: BTreeMap<FormId, PerkRecord>,
}

impl PatchMod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or add an editable override of `winning`.
    pub fn weapon_override(&mut self, winning: &WeaponRecord) -> &mut WeaponRecord {
        self.weapons
            .entry(winning.form.clone())
            .or_insert_with(|| winning.clone())
    }

    /// Get or add an editable override of `winning`.
    pub fn perk_override(&mut self, winning: &PerkRecord) -> &mut PerkRecord {
        self.perks
            .entry(winning.form.clone())
            .or_insert_with(|| winning.clone())
    }

    pub fn weapons(&self) -> impl Iterator<Item = &WeaponRecord> {
        self.weapons.values()
    }

    pub fn perks(&self) -> impl Iterator<Item = &PerkRecord> {
        self.perks.values()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.perks.is_empty()
    }
}
