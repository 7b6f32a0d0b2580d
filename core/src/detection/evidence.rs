//! Evidence trail rendering
//!
//! The line formats and their order are part of the engine's observable
//! output; callers display them verbatim.

use super::Selection;

/// Render the evidence trail for a selection.
///
/// 1. `Analyzed {N} casts`
/// 2. `Found {K} consistent effects`
/// 3. `Top effect: {type} ID {id} ({tally}/{N} casts)`
/// 4. up to `max_additional` lines `{type} {id}: {tally} occurrences`
///    for the runners-up
pub fn build_evidence(selection: &Selection, max_additional: usize) -> Vec<String> {
    let total = selection.total_casts;
    let primary = &selection.primary;

    let mut evidence = Vec::with_capacity(3 + max_additional.min(selection.runners_up.len()));
    evidence.push(format!("Analyzed {total} casts"));
    evidence.push(format!(
        "Found {} consistent effects",
        selection.qualifying_count()
    ));
    evidence.push(format!(
        "Top effect: {} ID {} ({}/{} casts)",
        primary.key.effect_type, primary.key.ability_id, primary.tally, total
    ));
    evidence.extend(
        selection
            .runners_up
            .iter()
            .take(max_additional)
            .map(|c| format!("{}: {} occurrences", c.key, c.tally)),
    );
    evidence
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::EffectType;
    use crate::detection::{CandidateKey, RankedCandidate};

    fn ranked(effect_type: EffectType, id: i64, tally: usize, total: usize) -> RankedCandidate {
        RankedCandidate {
            key: CandidateKey::new(effect_type, id),
            tally,
            consistency: tally as f64 / total as f64,
        }
    }

    #[test]
    fn renders_lines_in_order() {
        let selection = Selection {
            total_casts: 6,
            primary: ranked(EffectType::Resource, 216940, 6, 6),
            runners_up: vec![ranked(EffectType::Buff, 11, 4, 6)],
            confidence: 0.95,
            script_name: "Anchorite's Potency".to_string(),
        };

        assert_eq!(
            build_evidence(&selection, 3),
            vec![
                "Analyzed 6 casts",
                "Found 2 consistent effects",
                "Top effect: resource ID 216940 (6/6 casts)",
                "buff 11: 4 occurrences",
            ]
        );
    }

    #[test]
    fn runner_up_lines_are_capped() {
        let selection = Selection {
            total_casts: 4,
            primary: ranked(EffectType::Debuff, 1, 4, 4),
            runners_up: (2..7).map(|id| ranked(EffectType::Heal, id, 2, 4)).collect(),
            confidence: 0.95,
            script_name: "x".to_string(),
        };

        let evidence = build_evidence(&selection, 3);
        assert_eq!(evidence.len(), 6);
        assert_eq!(evidence[1], "Found 6 consistent effects");
        assert_eq!(evidence[5], "heal 4: 2 occurrences");
    }
}
