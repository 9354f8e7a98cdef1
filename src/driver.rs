//! The patch run.
//!
//! Walks the candidate records, rewrites their text, and stages changed
//! records in the [`PatchMod`]. The driver never prints; everything a
//! front end wants to show (renames, skips, missing target plugins,
//! tallies) comes back in the [`PatchReport`].

use crate::config::Settings;
use crate::rewrite::{rewrite_description, rewrite_name};
use crate::rules::{CategoryToggles, DESCRIPTION_RULES, NAME_RULES};
use crate::select;
use crate::store::{FormId, LoadOrder, PatchMod, PluginName, StoreError};
use thiserror::Error;

/// One weapon rename staged by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub form: FormId,
    pub editor_id: Option<String>,
    pub old: String,
    pub new: String,
}

/// One perk description update staged by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionEntry {
    pub form: FormId,
    pub editor_id: Option<String>,
    pub old: String,
    pub new: String,
}

/// A perk that could not be processed. Skips never fail the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPerk {
    pub form: FormId,
    pub reason: String,
}

/// Everything a run did, for rendering and for the final tallies.
#[derive(Debug, Default)]
pub struct PatchReport {
    /// Target plugins named in the settings but absent from the load order.
    pub missing_plugins: Vec<PluginName>,
    pub renames: Vec<RenameEntry>,
    pub description_updates: Vec<DescriptionEntry>,
    pub skipped_perks: Vec<SkippedPerk>,
}

impl PatchReport {
    pub fn weapons_renamed(&self) -> usize {
        self.renames.len()
    }

    pub fn perks_updated(&self) -> usize {
        self.description_updates.len()
    }
}

/// A failure that aborts the whole run. Per-perk resolution problems are
/// recorded as skips instead and never surface here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to enumerate weapon candidates: {0}")]
    WeaponSelection(#[source] StoreError),

    #[error("failed to enumerate baseline perks: {0}")]
    PerkSelection(#[source] StoreError),
}

/// Run the full patch: weapon renames, then (if enabled) perk description
/// updates. Changed records are staged in `patch`; nothing is persisted
/// here. Already-staged records are kept if a later step fails; writes
/// are not transactional across records.
pub fn run_patch(
    load_order: &dyn LoadOrder,
    patch: &mut PatchMod,
    settings: &Settings,
) -> Result<PatchReport, RunError> {
    let mut report = PatchReport::default();
    let targets = settings.target_plugin_names();

    for target in &targets {
        if !load_order.contains_plugin(target) {
            report.missing_plugins.push(target.clone());
        }
    }

    let toggles = CategoryToggles::from(settings);
    let candidates =
        select::name_candidates(load_order, &targets).map_err(RunError::WeaponSelection)?;

    for weapon in candidates {
        let Some(original) = weapon.name.as_deref() else {
            continue;
        };
        if original.is_empty() {
            continue;
        }

        let new_name = rewrite_name(original, NAME_RULES, &toggles);
        if new_name != original {
            report.renames.push(RenameEntry {
                form: weapon.form.clone(),
                editor_id: weapon.editor_id.clone(),
                old: original.to_string(),
                new: new_name.clone(),
            });
            patch.weapon_override(&weapon).name = Some(new_name);
        }
    }

    if settings.update_perk_descriptions {
        let forms = select::baseline_perk_forms(load_order).map_err(RunError::PerkSelection)?;

        for form in forms {
            let perk = match load_order.resolve_winning_perk(&form) {
                Ok(Some(perk)) => perk,
                Ok(None) => {
                    report.skipped_perks.push(SkippedPerk {
                        form,
                        reason: "no winning override".to_string(),
                    });
                    continue;
                }
                Err(err) => {
                    report.skipped_perks.push(SkippedPerk {
                        form,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let Some(original) = perk.description.as_deref() else {
                report.skipped_perks.push(SkippedPerk {
                    form,
                    reason: "no description".to_string(),
                });
                continue;
            };

            let new_description = rewrite_description(original, DESCRIPTION_RULES);
            if new_description != original {
                report.description_updates.push(DescriptionEntry {
                    form: perk.form.clone(),
                    editor_id: perk.editor_id.clone(),
                    old: original.to_string(),
                    new: new_description.clone(),
                });
                patch.perk_override(&perk).description = Some(new_description);
            }
        }
    }

    Ok(report)
}
