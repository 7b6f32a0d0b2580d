//! Post-cast event correlation
//!
//! For each cast, collects the candidate effects observed in the window
//! `(t, t + window_ms]` from the same source player.

use std::fmt;

use hashbrown::HashSet;
use tracing::trace;

use crate::combat_log::{AbilityId, CandidateEvents, CastEvent, EffectEvent, EffectType};

/// One hypothesis about which effect reveals the signature script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateKey {
    pub effect_type: EffectType,
    pub ability_id: AbilityId,
}

impl CandidateKey {
    pub fn new(effect_type: EffectType, ability_id: AbilityId) -> Self {
        Self {
            effect_type,
            ability_id,
        }
    }
}

impl fmt::Display for CandidateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.effect_type, self.ability_id)
    }
}

/// Candidates observed after a single cast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastWindow {
    pub cast: CastEvent,
    /// Distinct candidates in scan order: by effect type, then by timestamp
    pub candidates: Vec<CandidateKey>,
}

/// Correlates casts with the effect events that follow them.
///
/// Events are indexed by timestamp once, so each cast costs a pair of
/// binary searches per effect type plus the size of its window.
#[derive(Debug)]
pub struct EventCorrelator<'a> {
    window_ms: i64,
    index: [Vec<&'a EffectEvent>; 5],
}

impl<'a> EventCorrelator<'a> {
    pub fn new(events: &'a CandidateEvents, window_ms: i64) -> Self {
        let index = EffectType::ALL.map(|effect_type| {
            let mut sorted: Vec<&EffectEvent> = events.of_type(effect_type).iter().collect();
            sorted.sort_by_key(|e| e.timestamp);
            sorted
        });
        Self { window_ms, index }
    }

    pub fn correlate(&self, cast: &CastEvent) -> CastWindow {
        let window_end = cast.timestamp.saturating_add(self.window_ms);
        let mut seen = HashSet::new();
        let mut candidates: Vec<CandidateKey> = Vec::new();
        let mut foreign = 0usize;

        for effect_type in EffectType::SCAN_ORDER {
            let events = &self.index[effect_type.index()];
            // Left edge open: an effect at the cast timestamp cannot be its consequence
            let start = events.partition_point(|e| e.timestamp <= cast.timestamp);
            let end = events.partition_point(|e| e.timestamp <= window_end);
            let Some(in_window) = events.get(start..end) else {
                continue;
            };

            for event in in_window {
                if event.source_id != cast.source_id {
                    foreign += 1;
                    continue;
                }
                for ability_id in event.ability_ids() {
                    let key = CandidateKey::new(effect_type, ability_id);
                    if seen.insert(key) {
                        candidates.push(key);
                    }
                }
            }
        }

        trace!(
            cast_timestamp = cast.timestamp,
            source_id = cast.source_id,
            candidates = candidates.len(),
            foreign_events = foreign,
            "Correlated cast window"
        );

        CastWindow {
            cast: *cast,
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events_at(effect_type: EffectType, samples: &[(i64, i64, i64)]) -> CandidateEvents {
        let mut events = CandidateEvents::new();
        for &(timestamp, source, ability) in samples {
            events.push(effect_type, EffectEvent::new(timestamp, source, ability));
        }
        events
    }

    #[test]
    fn window_is_open_left_closed_right() {
        let events = events_at(
            EffectType::Buff,
            &[(1000, 1, 10), (2000, 1, 20), (2001, 1, 30), (1001, 1, 40)],
        );
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        let ids: Vec<_> = window.candidates.iter().map(|k| k.ability_id).collect();
        assert_eq!(ids, vec![40, 20]);
    }

    #[test]
    fn repeats_within_window_count_once() {
        let events = events_at(
            EffectType::Damage,
            &[(1100, 1, 10), (1200, 1, 10), (1300, 1, 10)],
        );
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        assert_eq!(
            window.candidates,
            vec![CandidateKey::new(EffectType::Damage, 10)]
        );
    }

    #[test]
    fn other_players_are_excluded() {
        let events = events_at(EffectType::Resource, &[(1500, 2, 216940), (1600, 1, 7)]);
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        assert_eq!(
            window.candidates,
            vec![CandidateKey::new(EffectType::Resource, 7)]
        );
    }

    #[test]
    fn same_id_under_different_types_are_distinct_candidates() {
        let mut events = CandidateEvents::new();
        events.push(EffectType::Heal, EffectEvent::new(1200, 1, 55));
        events.push(EffectType::Buff, EffectEvent::new(1100, 1, 55));
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        assert_eq!(
            window.candidates,
            vec![
                CandidateKey::new(EffectType::Buff, 55),
                CandidateKey::new(EffectType::Heal, 55),
            ]
        );
    }

    #[test]
    fn extra_ability_id_is_a_candidate() {
        let mut events = CandidateEvents::new();
        events.push(
            EffectType::Resource,
            EffectEvent::new(1300, 1, 5).with_extra(252143),
        );
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        assert_eq!(
            window.candidates,
            vec![
                CandidateKey::new(EffectType::Resource, 5),
                CandidateKey::new(EffectType::Resource, 252143),
            ]
        );
    }

    #[test]
    fn unsorted_input_is_handled() {
        let events = events_at(
            EffectType::Debuff,
            &[(2500, 1, 3), (1200, 1, 1), (1900, 1, 2), (900, 1, 0)],
        );
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        let ids: Vec<_> = window.candidates.iter().map(|k| k.ability_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn candidates_follow_type_scan_order_not_timestamp() {
        let mut events = CandidateEvents::new();
        events.push(EffectType::Resource, EffectEvent::new(1100, 1, 1));
        events.push(EffectType::Heal, EffectEvent::new(1200, 1, 2));
        events.push(EffectType::Buff, EffectEvent::new(1900, 1, 3));
        events.push(EffectType::Buff, EffectEvent::new(1300, 1, 4));
        let correlator = EventCorrelator::new(&events, 1000);

        let window = correlator.correlate(&CastEvent::new(1000, 1, 99));
        let ids: Vec<_> = window.candidates.iter().map(|k| k.ability_id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn candidate_key_display() {
        let key = CandidateKey::new(EffectType::Resource, 216940);
        assert_eq!(key.to_string(), "resource 216940");
    }
}
