//! Read-only lookup tables consumed by the detection engine
//!
//! Both tables are built once (from data files or the bundled defaults)
//! and handed to the engine; nothing mutates them afterwards.

use hashbrown::HashMap;
use scribe_types::ScribedRecipe;
use tracing::{debug, warn};

use super::bundled::{SCRIBED_SKILLS, SIGNATURE_EFFECT_NAMES};
use super::ScribingData;
use crate::combat_log::AbilityId;

/// Transformation type reported for an untransformed grimoire
pub const BASE_GRIMOIRE_TYPE: &str = "Base Grimoire";
/// Transformation name reported for an untransformed grimoire
pub const BASE_ABILITY_NAME: &str = "Base Ability";

/// Name reported for an effect ID the registry does not know
pub fn fallback_script_name(ability_id: AbilityId) -> String {
    format!("Signature Script (Effect ID: {ability_id})")
}

// ═══════════════════════════════════════════════════════════════════════════
// Signature Registry
// ═══════════════════════════════════════════════════════════════════════════

/// Maps signature effect IDs to script names
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    names: HashMap<AbilityId, String>,
}

impl SignatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded data. When two scripts claim the same effect ID the
    /// first one (in key order) wins.
    pub fn from_data(data: &ScribingData) -> Self {
        let mut registry = Self::new();
        for (key, script) in &data.signature_scripts {
            for id in script.effect_ids() {
                if let Some(existing) = registry.names.get(&id) {
                    if existing != &script.name {
                        warn!(
                            ability_id = id,
                            script = %key,
                            existing = %existing,
                            "Effect ID claimed by multiple signature scripts"
                        );
                    }
                    continue;
                }
                registry.names.insert(id, script.name.clone());
            }
        }
        registry
    }

    /// Registry backed by the built-in tables
    pub fn bundled() -> Self {
        SIGNATURE_EFFECT_NAMES
            .entries()
            .map(|(&id, &name)| (id, name.to_string()))
            .collect()
    }

    pub fn name(&self, ability_id: AbilityId) -> Option<&str> {
        self.names.get(&ability_id).map(String::as_str)
    }

    /// Script name for an effect ID, falling back to a generated name
    pub fn resolve_name(&self, ability_id: AbilityId) -> String {
        match self.name(ability_id) {
            Some(name) => name.to_string(),
            None => {
                debug!(ability_id, "No signature script mapped for effect ID");
                fallback_script_name(ability_id)
            }
        }
    }

    /// Every effect ID the registry knows
    pub fn effect_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.names.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(AbilityId, String)> for SignatureRegistry {
    fn from_iter<I: IntoIterator<Item = (AbilityId, String)>>(iter: I) -> Self {
        let mut names = HashMap::new();
        for (id, name) in iter {
            names.entry(id).or_insert(name);
        }
        Self { names }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Known Ability Table
// ═══════════════════════════════════════════════════════════════════════════

/// Maps scribed-skill ability IDs to their recipe
#[derive(Debug, Clone, Default)]
pub struct KnownAbilityTable {
    skills: HashMap<AbilityId, ScribedRecipe>,
}

impl KnownAbilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded data: every transformation ability ID, plus the
    /// grimoire's own base ID when present.
    pub fn from_data(data: &ScribingData) -> Self {
        let mut table = Self::new();
        for (key, grimoire) in &data.grimoires {
            if let Some(base_id) = grimoire.id {
                table.insert_first(
                    key,
                    base_id,
                    ScribedRecipe {
                        grimoire: grimoire.name.clone(),
                        transformation: BASE_ABILITY_NAME.to_string(),
                        transformation_type: BASE_GRIMOIRE_TYPE.to_string(),
                    },
                );
            }
            for transformation in grimoire.transformations.values() {
                for &id in &transformation.ability_ids {
                    table.insert_first(
                        key,
                        id,
                        ScribedRecipe {
                            grimoire: grimoire.name.clone(),
                            transformation: transformation.name.clone(),
                            transformation_type: transformation.transformation_type.clone(),
                        },
                    );
                }
            }
        }
        table
    }

    /// Table backed by the built-in tables
    pub fn bundled() -> Self {
        SCRIBED_SKILLS
            .entries()
            .map(|(&id, skill)| {
                (
                    id,
                    ScribedRecipe {
                        grimoire: skill.grimoire.to_string(),
                        transformation: skill.transformation.to_string(),
                        transformation_type: skill.transformation_type.to_string(),
                    },
                )
            })
            .collect()
    }

    fn insert_first(&mut self, grimoire_key: &str, ability_id: AbilityId, recipe: ScribedRecipe) {
        if self.skills.contains_key(&ability_id) {
            warn!(
                ability_id,
                grimoire = %grimoire_key,
                "Ability ID listed by multiple grimoires, keeping first"
            );
            return;
        }
        self.skills.insert(ability_id, recipe);
    }

    pub fn lookup(&self, ability_id: AbilityId) -> Option<&ScribedRecipe> {
        self.skills.get(&ability_id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<(AbilityId, ScribedRecipe)> for KnownAbilityTable {
    fn from_iter<I: IntoIterator<Item = (AbilityId, ScribedRecipe)>>(iter: I) -> Self {
        let mut skills = HashMap::new();
        for (id, recipe) in iter {
            skills.entry(id).or_insert(recipe);
        }
        Self { skills }
    }
}
