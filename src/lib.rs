//! Armory Patcher: renames Heavy Armory weapons and rewrites perk
//! descriptions across a load order.
//!
//! # Architecture
//!
//! Two ordered substitution tables drive everything. Weapon names go
//! through a first-match-wins, whole-word table gated by per-category
//! toggles; perk descriptions go through a sequential table where every
//! rule may fire, with a region tracker keeping later rules out of spans
//! earlier rules already produced. Selection decides which records a run
//! may touch (target-plugin weapons, vanilla weapons those plugins
//! override, baseline perks resolved to their winning override); the
//! driver orchestrates and stages changed records in an override patch.
//!
//! The record store sits behind the [`store::LoadOrder`] trait. Binary
//! plugin formats are out of scope; the bundled backend reads a JSON
//! snapshot of an already-parsed load order and writes the patch back out
//! as JSON.
//!
//! # Example
//!
//! ```no_run
//! use armory_patcher::config::Settings;
//! use armory_patcher::driver::run_patch;
//! use armory_patcher::store::{snapshot, PatchMod};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let load_order = snapshot::load_snapshot("loadorder.json")?;
//! let mut patch = PatchMod::new();
//! let report = run_patch(&load_order, &mut patch, &Settings::default())?;
//! println!(
//!     "{} weapons renamed, {} perks updated",
//!     report.weapons_renamed(),
//!     report.perks_updated()
//! );
//! snapshot::write_patch("patch.json", &patch)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod regions;
pub mod rewrite;
pub mod rules;
pub mod select;
pub mod store;
pub mod words;

// Re-exports
pub use config::{ConfigError, Settings};
pub use driver::{run_patch, PatchReport, RunError};
pub use rewrite::{rewrite_description, rewrite_name};
pub use rules::{Category, CategoryToggles, DESCRIPTION_RULES, NAME_RULES};
pub use store::{
    FormId, InMemoryLoadOrder, LoadOrder, PatchMod, PerkRecord, PluginData, PluginName,
    StoreError, WeaponRecord,
};
pub use words::contains_word;
