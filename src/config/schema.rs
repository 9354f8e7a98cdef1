use crate::store::PluginName;
use serde::Deserialize;
use std::fmt;

/// User settings, read from a TOML file. Every field has a default, so an
/// absent settings file means "patch everything with the stock target".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rename spears to half pikes.
    pub rename_spears: bool,
    /// Rename halberds to poleaxes.
    pub rename_halberds: bool,
    /// Rename quarterstaffs to shortstaffs.
    pub rename_quarterstaffs: bool,
    /// Rename katanas, wakizashis, tantos and dai-katanas to their western
    /// equivalents.
    pub rename_blades_swords: bool,
    /// Rewrite vanilla perk descriptions to mention the new weapon classes.
    pub update_perk_descriptions: bool,
    /// Plugins whose weapons are eligible for renaming, in order.
    pub target_plugins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rename_spears: true,
            rename_halberds: true,
            rename_quarterstaffs: true,
            rename_blades_swords: true,
            update_perk_descriptions: true,
            target_plugins: vec!["PrvtI_HeavyArmory.esp".to_string()],
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.target_plugins.is_empty() {
            issues.push(ValidationIssue::EmptyTargetList);
        }
        for (index, plugin) in self.target_plugins.iter().enumerate() {
            if plugin.trim().is_empty() {
                issues.push(ValidationIssue::BlankPluginName { index });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Target plugins as trimmed [`PluginName`]s, preserving order.
    pub fn target_plugin_names(&self) -> Vec<PluginName> {
        self.target_plugins
            .iter()
            .map(|plugin| plugin.trim())
            .filter(|plugin| !plugin.is_empty())
            .map(PluginName::new)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    EmptyTargetList,
    BlankPluginName { index: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTargetList => {
                write!(f, "target_plugins lists no plugins")
            }
            ValidationIssue::BlankPluginName { index } => {
                write!(f, "target_plugins entry {index} is blank")
            }
        }
    }
}
