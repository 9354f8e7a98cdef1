//! JSON snapshot I/O.
//!
//! A snapshot is a pre-parsed dump of a load order: one entry per plugin,
//! in load order, each carrying the weapon and perk records it defines or
//! overrides. The emitted patch is the same shape with a single implicit
//! plugin, holding only the records the run changed.

use crate::store::{InMemoryLoadOrder, PatchMod, PerkRecord, PluginData, WeaponRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write patch {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize patch: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    plugins: Vec<PluginEntry>,
}

#[derive(Debug, Deserialize)]
struct PluginEntry {
    name: String,
    #[serde(default)]
    weapons: Vec<WeaponRecord>,
    #[serde(default)]
    perks: Vec<PerkRecord>,
}

#[derive(Debug, Serialize)]
struct PatchFile<'a> {
    weapons: Vec<&'a WeaponRecord>,
    perks: Vec<&'a PerkRecord>,
}

/// Load a load-order snapshot from a JSON file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<InMemoryLoadOrder, SnapshotError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot: SnapshotFile =
        serde_json::from_str(&contents).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let plugins = snapshot
        .plugins
        .into_iter()
        .map(|entry| {
            PluginData::new(entry.name)
                .with_weapons(entry.weapons)
                .with_perks(entry.perks)
        })
        .collect();
    Ok(InMemoryLoadOrder::new(plugins))
}

/// Persist the override patch as JSON, atomically.
///
/// Written to a tempfile in the destination directory, synced, then renamed
/// into place, so a crash never leaves a half-written patch behind.
pub fn write_patch(path: impl AsRef<Path>, patch: &PatchMod) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let file = PatchFile {
        weapons: patch.weapons().collect(),
        perks: patch.perks().collect(),
    };
    let mut contents = serde_json::to_vec_pretty(&file)?;
    contents.push(b'\n');

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    let write_in = parent.unwrap_or_else(|| Path::new("."));
    let io_err = |source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = tempfile::NamedTempFile::new_in(write_in).map_err(io_err)?;
    temp.write_all(&contents).map_err(io_err)?;
    temp.as_file().sync_all().map_err(io_err)?;
    temp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
