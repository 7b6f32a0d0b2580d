//! Fight-scoped event collections
//!
//! The ingestion layer hands over every typed event of a fight at once.
//! Detection runs per (player, ability), so this module carves out the
//! slice of events each run is allowed to see.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{AbilityId, CandidateEvents, CastEvent, PlayerId};

/// A player's scribed ability to analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerAbility {
    pub player_id: PlayerId,
    pub ability_id: AbilityId,
}

impl PlayerAbility {
    pub fn new(player_id: PlayerId, ability_id: AbilityId) -> Self {
        Self {
            player_id,
            ability_id,
        }
    }
}

/// All typed events of one fight, every player included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightEvents {
    #[serde(default)]
    pub casts: Vec<CastEvent>,
    #[serde(default)]
    pub effects: CandidateEvents,
}

/// Events visible to a single detection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopedEvents {
    /// Casts of the requested ability by the requested player
    pub casts: Vec<CastEvent>,
    /// Effect events sourced by the requested player
    pub effects: CandidateEvents,
}

impl FightEvents {
    pub fn new(casts: Vec<CastEvent>, effects: CandidateEvents) -> Self {
        Self { casts, effects }
    }

    /// Restrict events to one player and one ability.
    ///
    /// Effect events are kept regardless of ability: telling base effects
    /// apart from signature effects is the candidate filter's job.
    pub fn scope(&self, target: PlayerAbility) -> ScopedEvents {
        let casts = self
            .casts
            .iter()
            .filter(|c| c.source_id == target.player_id && c.ability_id == target.ability_id)
            .copied()
            .collect();
        let effects = self
            .effects
            .filtered(|_, e| e.source_id == target.player_id);

        ScopedEvents { casts, effects }
    }

    /// Every distinct (player, ability) pair that was cast, in first-seen order
    pub fn player_abilities(&self) -> Vec<PlayerAbility> {
        let mut seen = HashSet::new();
        self.casts
            .iter()
            .map(|c| PlayerAbility::new(c.source_id, c.ability_id))
            .filter(|pair| seen.insert(*pair))
            .collect()
    }
}
