use std::fmt;

use serde::{Deserialize, Serialize};

pub type AbilityId = i64;
pub type PlayerId = i64;

/// Kind of combat record an effect was observed as.
///
/// Closed set: every correlation and tally is keyed on one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Resource,
    Buff,
    Debuff,
    Damage,
    Heal,
}

impl EffectType {
    /// All effect types, in storage order
    pub const ALL: [EffectType; 5] = [
        EffectType::Resource,
        EffectType::Buff,
        EffectType::Debuff,
        EffectType::Damage,
        EffectType::Heal,
    ];

    /// Order in which post-cast collections are scanned for candidates.
    /// First-scanned candidates win ties.
    pub const SCAN_ORDER: [EffectType; 5] = [
        EffectType::Buff,
        EffectType::Debuff,
        EffectType::Damage,
        EffectType::Heal,
        EffectType::Resource,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EffectType::Resource => "resource",
            EffectType::Buff => "buff",
            EffectType::Debuff => "debuff",
            EffectType::Damage => "damage",
            EffectType::Heal => "heal",
        }
    }

    /// Position in `ALL`
    pub const fn index(&self) -> usize {
        match self {
            EffectType::Resource => 0,
            EffectType::Buff => 1,
            EffectType::Debuff => 2,
            EffectType::Damage => 3,
            EffectType::Heal => 4,
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One activation of a scribed ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastEvent {
    /// Milliseconds since fight start
    pub timestamp: i64,
    pub source_id: PlayerId,
    pub ability_id: AbilityId,
}

impl CastEvent {
    pub fn new(timestamp: i64, source_id: PlayerId, ability_id: AbilityId) -> Self {
        Self {
            timestamp,
            source_id,
            ability_id,
        }
    }
}

/// Any other combat record that may be a side effect of a cast.
///
/// The effect type is not stored on the event: it is the collection the
/// event lives in (see [`CandidateEvents`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectEvent {
    pub timestamp: i64,
    pub source_id: PlayerId,
    pub ability_id: AbilityId,
    /// Secondary ability carried by some records (e.g. the effect that
    /// triggered a resource change)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_ability_id: Option<AbilityId>,
}

impl EffectEvent {
    pub fn new(timestamp: i64, source_id: PlayerId, ability_id: AbilityId) -> Self {
        Self {
            timestamp,
            source_id,
            ability_id,
            extra_ability_id: None,
        }
    }

    pub fn with_extra(mut self, extra_ability_id: AbilityId) -> Self {
        self.extra_ability_id = Some(extra_ability_id);
        self
    }

    /// Ability IDs this event can stand for: the primary ID, then the
    /// secondary one when set, non-zero and distinct.
    pub fn ability_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        let extra = self
            .extra_ability_id
            .filter(|&id| id != 0 && id != self.ability_id);
        std::iter::once(self.ability_id).chain(extra)
    }
}

/// Effect events partitioned by [`EffectType`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateEvents {
    pub resource: Vec<EffectEvent>,
    pub buff: Vec<EffectEvent>,
    pub debuff: Vec<EffectEvent>,
    pub damage: Vec<EffectEvent>,
    pub heal: Vec<EffectEvent>,
}

impl CandidateEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(&self, effect_type: EffectType) -> &[EffectEvent] {
        match effect_type {
            EffectType::Resource => &self.resource,
            EffectType::Buff => &self.buff,
            EffectType::Debuff => &self.debuff,
            EffectType::Damage => &self.damage,
            EffectType::Heal => &self.heal,
        }
    }

    pub fn of_type_mut(&mut self, effect_type: EffectType) -> &mut Vec<EffectEvent> {
        match effect_type {
            EffectType::Resource => &mut self.resource,
            EffectType::Buff => &mut self.buff,
            EffectType::Debuff => &mut self.debuff,
            EffectType::Damage => &mut self.damage,
            EffectType::Heal => &mut self.heal,
        }
    }

    pub fn push(&mut self, effect_type: EffectType, event: EffectEvent) {
        self.of_type_mut(effect_type).push(event);
    }

    /// Iterate every event with its type, collection by collection
    pub fn iter(&self) -> impl Iterator<Item = (EffectType, &EffectEvent)> {
        EffectType::ALL
            .into_iter()
            .flat_map(move |t| self.of_type(t).iter().map(move |e| (t, e)))
    }

    pub fn len(&self) -> usize {
        EffectType::ALL.iter().map(|&t| self.of_type(t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of these events keeping only those matching `keep`
    pub fn filtered(&self, mut keep: impl FnMut(EffectType, &EffectEvent) -> bool) -> Self {
        let mut out = Self::new();
        for (effect_type, event) in self.iter() {
            if keep(effect_type, event) {
                out.push(effect_type, *event);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_ids_include_distinct_extra() {
        let event = EffectEvent::new(10, 1, 100).with_extra(200);
        assert_eq!(event.ability_ids().collect::<Vec<_>>(), vec![100, 200]);

        let same = EffectEvent::new(10, 1, 100).with_extra(100);
        assert_eq!(same.ability_ids().collect::<Vec<_>>(), vec![100]);

        let zero = EffectEvent::new(10, 1, 100).with_extra(0);
        assert_eq!(zero.ability_ids().collect::<Vec<_>>(), vec![100]);
    }

    #[test]
    fn candidate_events_iterate_in_type_order() {
        let mut events = CandidateEvents::new();
        events.push(EffectType::Heal, EffectEvent::new(5, 1, 5));
        events.push(EffectType::Resource, EffectEvent::new(1, 1, 1));
        events.push(EffectType::Debuff, EffectEvent::new(3, 1, 3));

        let types: Vec<_> = events.iter().map(|(t, _)| t).collect();
        assert_eq!(
            types,
            vec![EffectType::Resource, EffectType::Debuff, EffectType::Heal]
        );
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn effect_type_deserializes_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            kind: EffectType,
        }

        let parsed: Wrapper = toml::from_str(r#"kind = "debuff""#).expect("valid effect type");
        assert_eq!(parsed.kind, EffectType::Debuff);
        assert_eq!(EffectType::Debuff.index(), 2);
    }
}
