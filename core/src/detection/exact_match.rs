//! Exact ability-ID resolution
//!
//! When the analyzed ability is itself a known scribed-skill ID the recipe
//! is a table lookup and no inference is needed.

use scribe_types::{DetectionResult, METHOD_ABILITY_ID_MATCH};

use crate::combat_log::AbilityId;
use crate::game_data::KnownAbilityTable;

/// Confidence reported for table matches
pub const EXACT_MATCH_CONFIDENCE: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct ExactMatchResolver<'a> {
    table: &'a KnownAbilityTable,
}

impl<'a> ExactMatchResolver<'a> {
    pub fn new(table: &'a KnownAbilityTable) -> Self {
        Self { table }
    }

    /// `None` when the ID is not in the table
    pub fn resolve(&self, ability_id: AbilityId) -> Option<DetectionResult> {
        let recipe = self.table.lookup(ability_id)?;
        Some(DetectionResult {
            script_name: recipe.transformation.clone(),
            confidence: EXACT_MATCH_CONFIDENCE,
            detection_method: METHOD_ABILITY_ID_MATCH.to_string(),
            evidence: vec![format!(
                "Ability ID {ability_id} matches {}: {} ({})",
                recipe.grimoire, recipe.transformation, recipe.transformation_type
            )],
            recipe: Some(recipe.clone()),
        })
    }
}
