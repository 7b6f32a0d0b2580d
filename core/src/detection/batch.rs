//! Fight-level batch detection
//!
//! Every requested (player, ability) pair is independent, so requests fan
//! out over the rayon pool and are collected back in request order.

use rayon::prelude::*;
use scribe_types::DetectionResult;
use serde::Serialize;
use tracing::info;

use super::{CandidateFilter, DetectionError, FilterPolicy, SignatureDetector};
use crate::combat_log::{AbilityId, FightEvents, PlayerAbility, PlayerId};

/// What detection concluded for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    Detected(DetectionResult),
    /// Cast at least once, but no candidate was consistent enough
    NoSignature,
    /// The player never cast the ability in this fight
    NotCast,
    Rejected { reason: String },
}

impl DetectionOutcome {
    pub fn result(&self) -> Option<&DetectionResult> {
        match self {
            Self::Detected(result) => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityDetection {
    pub player_id: PlayerId,
    pub ability_id: AbilityId,
    /// Casts of the ability by the player in this fight
    pub casts: usize,
    #[serde(flatten)]
    pub outcome: DetectionOutcome,
}

/// Run detection for each request against one fight's events.
///
/// The analyzed ability ID doubles as the exact-match key, so known
/// scribed skills resolve even when the fight holds no casts of them.
pub fn analyze_fight(
    detector: &SignatureDetector,
    fight: &FightEvents,
    requests: &[PlayerAbility],
    policy: FilterPolicy,
) -> Vec<AbilityDetection> {
    let detections: Vec<AbilityDetection> = requests
        .par_iter()
        .map(|&request| analyze_one(detector, fight, request, policy))
        .collect();

    let detected = detections
        .iter()
        .filter(|d| matches!(d.outcome, DetectionOutcome::Detected(_)))
        .count();
    let rejected = detections
        .iter()
        .filter(|d| matches!(d.outcome, DetectionOutcome::Rejected { .. }))
        .count();
    info!(
        requests = requests.len(),
        detected,
        rejected,
        "Fight analysis complete"
    );

    detections
}

fn analyze_one(
    detector: &SignatureDetector,
    fight: &FightEvents,
    request: PlayerAbility,
    policy: FilterPolicy,
) -> AbilityDetection {
    let scoped = fight.scope(request);
    let filter = CandidateFilter::from_policy(policy, request.ability_id, detector.registry());
    let effects = filter.apply(&scoped.effects);

    let outcome = match detector.detect_signature(&scoped.casts, &effects, Some(request.ability_id))
    {
        Ok(Some(result)) => DetectionOutcome::Detected(result),
        Ok(None) => DetectionOutcome::NoSignature,
        Err(DetectionError::NoCasts) => DetectionOutcome::NotCast,
        Err(e) => DetectionOutcome::Rejected {
            reason: e.to_string(),
        },
    };

    AbilityDetection {
        player_id: request.player_id,
        ability_id: request.ability_id,
        casts: scoped.casts.len(),
        outcome,
    }
}
