//! Signature script detection entry point

use std::sync::Arc;

use scribe_types::{DetectionResult, DetectionSettings, METHOD_POST_CAST_ANALYSIS};
use tracing::debug;

use super::{
    ConsistencyAggregator, DetectionError, EventCorrelator, ExactMatchResolver, SignatureSelector,
    build_evidence,
};
use crate::combat_log::{AbilityId, CandidateEvents, CastEvent};
use crate::game_data::{KnownAbilityTable, SignatureRegistry};

/// Infers the signature script of one player's scribed ability.
///
/// Holds only read-only tables and settings; every call builds its own
/// tallies, so a detector can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct SignatureDetector {
    registry: Arc<SignatureRegistry>,
    known: Arc<KnownAbilityTable>,
    settings: DetectionSettings,
}

impl SignatureDetector {
    pub fn new(registry: Arc<SignatureRegistry>, known: Arc<KnownAbilityTable>) -> Self {
        Self::with_settings(registry, known, DetectionSettings::default())
    }

    pub fn with_settings(
        registry: Arc<SignatureRegistry>,
        known: Arc<KnownAbilityTable>,
        settings: DetectionSettings,
    ) -> Self {
        Self {
            registry,
            known,
            settings,
        }
    }

    /// Detector over the compiled-in tables
    pub fn bundled() -> Self {
        Self::new(
            Arc::new(SignatureRegistry::bundled()),
            Arc::new(KnownAbilityTable::bundled()),
        )
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    /// Detect the signature script behind `casts`.
    ///
    /// `casts` must all be the same ability from the same player. Effect
    /// events from other players are ignored rather than rejected. A known
    /// scribed-skill ID short-circuits to an exact match before any cast is
    /// looked at.
    ///
    /// Returns `Ok(None)` when no candidate is consistent enough.
    pub fn detect_signature(
        &self,
        casts: &[CastEvent],
        effects: &CandidateEvents,
        known_ability_id: Option<AbilityId>,
    ) -> Result<Option<DetectionResult>, DetectionError> {
        if let Some(result) =
            known_ability_id.and_then(|id| ExactMatchResolver::new(&self.known).resolve(id))
        {
            debug!(ability_id = ?known_ability_id, "Exact ability ID match");
            return Ok(Some(result));
        }

        validate_casts(casts)?;

        let mut ordered = casts.to_vec();
        ordered.sort_by_key(|c| c.timestamp);

        let correlator = EventCorrelator::new(effects, self.settings.window_ms);
        let mut aggregator = ConsistencyAggregator::new();
        for cast in &ordered {
            aggregator.record(&correlator.correlate(cast));
        }
        let report = aggregator.finish()?;

        let Some(selection) = SignatureSelector::new(&self.registry, &self.settings).select(&report)
        else {
            debug!(
                casts = report.total_casts(),
                candidates = report.tallies().len(),
                "No consistent signature candidate"
            );
            return Ok(None);
        };

        debug!(
            script = %selection.script_name,
            candidate = %selection.primary.key,
            tally = selection.primary.tally,
            casts = selection.total_casts,
            "Signature script detected"
        );

        let evidence = build_evidence(&selection, self.settings.max_additional_evidence);
        Ok(Some(DetectionResult {
            script_name: selection.script_name,
            confidence: selection.confidence,
            detection_method: METHOD_POST_CAST_ANALYSIS.to_string(),
            evidence,
            recipe: None,
        }))
    }
}

impl Default for SignatureDetector {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Casts must be non-empty and share one source player and one ability
fn validate_casts(casts: &[CastEvent]) -> Result<(), DetectionError> {
    let Some(first) = casts.first() else {
        return Err(DetectionError::NoCasts);
    };

    for cast in &casts[1..] {
        if cast.source_id != first.source_id {
            return Err(DetectionError::MixedCastSources {
                expected: first.source_id,
                found: cast.source_id,
                timestamp: cast.timestamp,
            });
        }
        if cast.ability_id != first.ability_id {
            return Err(DetectionError::MixedCastAbilities {
                expected: first.ability_id,
                found: cast.ability_id,
                timestamp: cast.timestamp,
            });
        }
    }
    Ok(())
}
