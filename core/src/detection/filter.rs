//! Candidate admission before correlation
//!
//! Strips effects that belong to the ability's base behavior (or are
//! otherwise uninteresting) so the correlator only sees plausible
//! signature effects.

use hashbrown::HashSet;

use crate::combat_log::{AbilityId, CandidateEvents, EffectEvent};
use crate::game_data::SignatureRegistry;

/// How batch analysis builds its candidate filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    /// Exclude the analyzed ability, admit only registry effect IDs
    #[default]
    RegistryOnly,
    /// Exclude the analyzed ability, admit everything else
    ExcludeBase,
    /// Admit everything
    Permissive,
}

/// Blacklist plus optional allow-list over ability IDs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    excluded: HashSet<AbilityId>,
    allowed: Option<HashSet<AbilityId>>,
}

impl CandidateFilter {
    /// Filter that admits every ID
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Exclude the ability's own ID and admit only known signature effects
    pub fn for_ability(ability_id: AbilityId, registry: &SignatureRegistry) -> Self {
        Self::permissive()
            .exclude([ability_id])
            .allow_only(registry.effect_ids())
    }

    /// Filter for `policy` when analyzing `ability_id`
    pub fn from_policy(
        policy: FilterPolicy,
        ability_id: AbilityId,
        registry: &SignatureRegistry,
    ) -> Self {
        match policy {
            FilterPolicy::RegistryOnly => Self::for_ability(ability_id, registry),
            FilterPolicy::ExcludeBase => Self::permissive().exclude([ability_id]),
            FilterPolicy::Permissive => Self::permissive(),
        }
    }

    pub fn exclude(mut self, ids: impl IntoIterator<Item = AbilityId>) -> Self {
        self.excluded.extend(ids);
        self
    }

    /// Restrict admission to `ids`. Repeated calls narrow to the intersection.
    pub fn allow_only(mut self, ids: impl IntoIterator<Item = AbilityId>) -> Self {
        let ids: HashSet<AbilityId> = ids.into_iter().collect();
        self.allowed = Some(match self.allowed.take() {
            Some(current) => current.intersection(&ids).copied().collect(),
            None => ids,
        });
        self
    }

    pub fn admits(&self, ability_id: AbilityId) -> bool {
        !self.excluded.contains(&ability_id)
            && self
                .allowed
                .as_ref()
                .is_none_or(|allowed| allowed.contains(&ability_id))
    }

    /// Filtered copy of `events`.
    ///
    /// Events carrying a secondary ID are split so each output event stands
    /// for exactly one admitted ID.
    pub fn apply(&self, events: &CandidateEvents) -> CandidateEvents {
        let mut out = CandidateEvents::new();
        for (effect_type, event) in events.iter() {
            for ability_id in event.ability_ids().filter(|&id| self.admits(id)) {
                out.push(
                    effect_type,
                    EffectEvent::new(event.timestamp, event.source_id, ability_id),
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::EffectType;

    fn registry() -> SignatureRegistry {
        [
            (216940, "Anchorite's Potency".to_string()),
            (252143, "Class Mastery".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn for_ability_excludes_base_and_unknown_ids() {
        let filter = CandidateFilter::for_ability(217784, &registry());

        assert!(filter.admits(216940));
        assert!(!filter.admits(217784));
        assert!(!filter.admits(12345));
    }

    #[test]
    fn excluded_wins_over_allowed() {
        let filter = CandidateFilter::permissive()
            .allow_only([1, 2])
            .exclude([2]);
        assert!(filter.admits(1));
        assert!(!filter.admits(2));
    }

    #[test]
    fn allow_only_narrows() {
        let filter = CandidateFilter::permissive()
            .allow_only([1, 2, 3])
            .allow_only([2, 3, 4]);
        assert!(!filter.admits(1));
        assert!(filter.admits(2));
        assert!(!filter.admits(4));
    }

    #[test]
    fn apply_splits_secondary_ids() {
        let mut events = CandidateEvents::new();
        events.push(
            EffectType::Resource,
            EffectEvent::new(100, 1, 5).with_extra(252143),
        );
        events.push(EffectType::Buff, EffectEvent::new(200, 1, 217784));
        events.push(EffectType::Buff, EffectEvent::new(300, 1, 216940));

        let filtered = CandidateFilter::for_ability(217784, &registry()).apply(&events);

        assert_eq!(
            filtered.resource,
            vec![EffectEvent::new(100, 1, 252143)]
        );
        assert_eq!(filtered.buff, vec![EffectEvent::new(300, 1, 216940)]);
    }

    #[test]
    fn policies() {
        let registry = registry();
        let permissive = CandidateFilter::from_policy(FilterPolicy::Permissive, 9, &registry);
        assert!(permissive.admits(9));

        let base = CandidateFilter::from_policy(FilterPolicy::ExcludeBase, 9, &registry);
        assert!(!base.admits(9));
        assert!(base.admits(10));

        let strict = CandidateFilter::from_policy(FilterPolicy::RegistryOnly, 9, &registry);
        assert!(!strict.admits(10));
        assert!(strict.admits(216940));
    }
}
