//! Candidate thresholding, ranking and confidence scoring

use scribe_types::DetectionSettings;

use super::{CandidateKey, ConsistencyReport};
use crate::game_data::SignatureRegistry;

/// A candidate that passed the consistency threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub key: CandidateKey,
    pub tally: usize,
    pub consistency: f64,
}

/// The selector's decision for one ability
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub total_casts: usize,
    pub primary: RankedCandidate,
    /// Remaining qualifying candidates, best first
    pub runners_up: Vec<RankedCandidate>,
    /// Primary consistency capped at the configured ceiling
    pub confidence: f64,
    pub script_name: String,
}

impl Selection {
    /// Number of candidates that passed the threshold
    pub fn qualifying_count(&self) -> usize {
        1 + self.runners_up.len()
    }
}

/// Picks the primary signature candidate from a consistency report
#[derive(Debug, Clone, Copy)]
pub struct SignatureSelector<'a> {
    registry: &'a SignatureRegistry,
    min_consistency: f64,
    confidence_ceiling: f64,
}

impl<'a> SignatureSelector<'a> {
    pub fn new(registry: &'a SignatureRegistry, settings: &DetectionSettings) -> Self {
        Self {
            registry,
            min_consistency: settings.min_consistency,
            confidence_ceiling: settings.confidence_ceiling,
        }
    }

    /// `None` when no candidate reaches the threshold
    pub fn select(&self, report: &ConsistencyReport) -> Option<Selection> {
        let total = report.total_casts();
        let required = total as f64 * self.min_consistency;

        let mut qualifying: Vec<RankedCandidate> = report
            .tallies()
            .iter()
            .filter(|t| t.casts as f64 >= required)
            .map(|t| RankedCandidate {
                key: t.key,
                tally: t.casts,
                consistency: report.consistency(t),
            })
            .collect();

        // Stable sort: equal tallies keep first-observed order
        qualifying.sort_by(|a, b| b.tally.cmp(&a.tally));

        let mut ranked = qualifying.into_iter();
        let primary = ranked.next()?;
        let runners_up: Vec<_> = ranked.collect();

        Some(Selection {
            total_casts: total,
            confidence: primary.consistency.min(self.confidence_ceiling),
            script_name: self.registry.resolve_name(primary.key.ability_id),
            primary,
            runners_up,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::{CastEvent, EffectType};
    use crate::detection::{CastWindow, ConsistencyAggregator};

    fn report(total: usize, observed: &[(EffectType, i64, usize)]) -> ConsistencyReport {
        let mut aggregator = ConsistencyAggregator::new();
        for cast in 0..total {
            let candidates = observed
                .iter()
                .filter(|(_, _, casts)| cast < *casts)
                .map(|&(t, id, _)| CandidateKey::new(t, id))
                .collect();
            aggregator.record(&CastWindow {
                cast: CastEvent::new(cast as i64 * 5000, 1, 99),
                candidates,
            });
        }
        aggregator.finish().expect("casts recorded")
    }

    fn registry() -> SignatureRegistry {
        [(216940, "Anchorite's Potency".to_string())].into_iter().collect()
    }

    #[test]
    fn full_consistency_is_capped() {
        let registry = registry();
        let selector = SignatureSelector::new(&registry, &DetectionSettings::default());

        let selection = selector
            .select(&report(6, &[(EffectType::Resource, 216940, 6)]))
            .expect("qualifies");
        assert_eq!(selection.confidence, 0.95);
        assert_eq!(selection.script_name, "Anchorite's Potency");
    }

    #[test]
    fn threshold_is_inclusive() {
        let registry = registry();
        let selector = SignatureSelector::new(&registry, &DetectionSettings::default());

        let selection = selector
            .select(&report(6, &[(EffectType::Buff, 7, 3)]))
            .expect("50% qualifies");
        assert_eq!(selection.confidence, 0.5);
        assert_eq!(selection.script_name, "Signature Script (Effect ID: 7)");

        assert!(selector.select(&report(4, &[(EffectType::Buff, 7, 1)])).is_none());
    }

    #[test]
    fn ranks_by_tally_then_first_observed() {
        let registry = registry();
        let selector = SignatureSelector::new(&registry, &DetectionSettings::default());

        let selection = selector
            .select(&report(
                4,
                &[
                    (EffectType::Buff, 1, 2),
                    (EffectType::Debuff, 2, 4),
                    (EffectType::Heal, 3, 2),
                    (EffectType::Damage, 4, 1),
                ],
            ))
            .expect("qualifies");

        assert_eq!(selection.primary.key.ability_id, 2);
        let runners: Vec<_> = selection.runners_up.iter().map(|c| c.key.ability_id).collect();
        assert_eq!(runners, vec![1, 3]);
        assert_eq!(selection.qualifying_count(), 3);
    }
}
