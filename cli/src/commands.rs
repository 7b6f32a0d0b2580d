use std::fs;
use std::io::Write;
use std::path::Path;

use scribe_core::combat_log::{AbilityId, FightEvents, PlayerAbility, PlayerId};
use scribe_core::detection::{AbilityDetection, analyze_fight};

use crate::CliContext;

/// Read a fight's typed events from a JSON file
pub fn load_fight(path: &Path) -> Result<FightEvents, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid events in {}: {e}", path.display()))
}

/// Pairs to analyze.
///
/// With both IDs given the pair is analyzed even if it was never cast, so
/// known scribed skills still resolve. Otherwise every cast pair matching
/// the given IDs is used.
pub fn select_requests(
    fight: &FightEvents,
    player: Option<PlayerId>,
    ability: Option<AbilityId>,
) -> Vec<PlayerAbility> {
    if let (Some(player_id), Some(ability_id)) = (player, ability) {
        return vec![PlayerAbility::new(player_id, ability_id)];
    }

    fight
        .player_abilities()
        .into_iter()
        .filter(|pair| player.is_none_or(|id| pair.player_id == id))
        .filter(|pair| ability.is_none_or(|id| pair.ability_id == id))
        .collect()
}

pub fn detect(
    ctx: &CliContext,
    fight: &FightEvents,
    player: Option<PlayerId>,
    ability: Option<AbilityId>,
) -> Vec<AbilityDetection> {
    let requests = select_requests(fight, player, ability);
    analyze_fight(&ctx.detector, fight, &requests, ctx.policy)
}

pub fn write_report(
    out: &mut impl Write,
    detections: &[AbilityDetection],
    pretty: bool,
) -> Result<(), String> {
    let json = if pretty {
        serde_json::to_string_pretty(detections)
    } else {
        serde_json::to_string(detections)
    }
    .map_err(|e| e.to_string())?;

    writeln!(out, "{json}").map_err(|e| e.to_string())?;
    out.flush().map_err(|e| e.to_string())
}
