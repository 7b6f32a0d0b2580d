//! Scribing data file format and loading
//!
//! Data files are TOML and describe grimoires (with their transformations)
//! and signature scripts (with the effect IDs they leave in the log).
//! A directory of files is merged into a single [`ScribingData`].
//!
//! ```toml
//! [grimoires.soul-burst]
//! name = "Soul Burst"
//!
//! [grimoires.soul-burst.transformations.wield-soul]
//! name = "Wield Soul"
//! ability_ids = [217784]
//!
//! [signature_scripts.anchorites-potency]
//! name = "Anchorite's Potency"
//! ability_ids = [216940]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::DataError;
use crate::combat_log::AbilityId;

/// Transformation of a grimoire into a concrete scribed skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationDefinition {
    pub name: String,

    /// Ability IDs the transformed skill is logged under
    #[serde(default)]
    pub ability_ids: Vec<AbilityId>,

    #[serde(default = "crate::serde_defaults::default_transformation_type")]
    pub transformation_type: String,
}

/// A grimoire (base skill) and its transformations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrimoireDefinition {
    /// Base ability ID of the untransformed grimoire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AbilityId>,

    pub name: String,

    #[serde(default)]
    pub transformations: BTreeMap<String, TransformationDefinition>,
}

/// Effects a signature script produces only on a specific grimoire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrimoireEffects {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_ability_id: Option<AbilityId>,

    #[serde(default)]
    pub status_effects: Vec<AbilityId>,
}

/// A signature script and the effect IDs that reveal it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureScriptDefinition {
    pub name: String,

    #[serde(default)]
    pub ability_ids: Vec<AbilityId>,

    /// IDs the log reports that the script tables do not list
    /// (e.g. Class Mastery surfacing through an ultimate tick)
    #[serde(default)]
    pub extra_effect_ids: Vec<AbilityId>,

    /// Per-grimoire effects, keyed by grimoire key
    #[serde(default)]
    pub grimoire_effects: BTreeMap<String, GrimoireEffects>,
}

impl SignatureScriptDefinition {
    /// Every effect ID attributable to this script
    pub fn effect_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        let grimoire_ids = self.grimoire_effects.values().flat_map(|g| {
            g.main_ability_id
                .into_iter()
                .chain(g.status_effects.iter().copied())
        });
        self.ability_ids
            .iter()
            .copied()
            .chain(grimoire_ids)
            .chain(self.extra_effect_ids.iter().copied())
    }
}

/// Contents of one or more scribing data files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScribingData {
    #[serde(default)]
    pub grimoires: BTreeMap<String, GrimoireDefinition>,

    #[serde(default)]
    pub signature_scripts: BTreeMap<String, SignatureScriptDefinition>,
}

impl ScribingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse data from TOML text. `path` is only used for error context.
    pub fn parse(content: &str, path: &Path) -> Result<Self, DataError> {
        let data: ScribingData = toml::from_str(content).map_err(|source| DataError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        data.validate(path)?;
        Ok(data)
    }

    /// Load a single data file
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path).map_err(|source| DataError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load and merge every `.toml` file under `dir` (recursive).
    /// A missing directory yields empty data.
    pub fn load_dir(dir: &Path) -> Result<Self, DataError> {
        let mut data = Self::new();
        if !dir.exists() {
            return Ok(data);
        }
        load_recursive(dir, &mut data)?;
        Ok(data)
    }

    /// Load a file or a directory, whichever `path` is
    pub fn load_path(path: &Path) -> Result<Self, DataError> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load(path)
        }
    }

    /// Merge `other` into `self`. Keys already present are kept.
    pub fn merge(&mut self, other: ScribingData) {
        for (key, grimoire) in other.grimoires {
            if self.grimoires.contains_key(&key) {
                warn!(grimoire = %key, "Duplicate grimoire definition, keeping first");
                continue;
            }
            self.grimoires.insert(key, grimoire);
        }
        for (key, script) in other.signature_scripts {
            if self.signature_scripts.contains_key(&key) {
                warn!(script = %key, "Duplicate signature script definition, keeping first");
                continue;
            }
            self.signature_scripts.insert(key, script);
        }
    }

    fn validate(&self, path: &Path) -> Result<(), DataError> {
        let invalid = |reason: String| DataError::InvalidDefinition {
            path: path.to_path_buf(),
            reason,
        };

        for (key, grimoire) in &self.grimoires {
            if grimoire.name.trim().is_empty() {
                return Err(invalid(format!("grimoire '{key}' has no name")));
            }
            for (t_key, transformation) in &grimoire.transformations {
                if transformation.name.trim().is_empty() {
                    return Err(invalid(format!(
                        "transformation '{key}.{t_key}' has no name"
                    )));
                }
            }
        }
        for (key, script) in &self.signature_scripts {
            if script.name.trim().is_empty() {
                return Err(invalid(format!("signature script '{key}' has no name")));
            }
        }
        Ok(())
    }
}

fn load_recursive(dir: &Path, data: &mut ScribingData) -> Result<(), DataError> {
    let entries = fs::read_dir(dir).map_err(|source| DataError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    // Sorted so merge precedence does not depend on filesystem order
    let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_recursive(&path, data)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            data.merge(ScribingData::load(&path)?);
        }
    }
    Ok(())
}
