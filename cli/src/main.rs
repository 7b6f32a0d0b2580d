//! Signature script detection CLI
//!
//! Reads one fight's typed cast and effect events (JSON), runs detection
//! for every requested player/ability pair and prints the results as JSON.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use scribe_cli::{CliContext, commands, logging};
use scribe_core::combat_log::{AbilityId, PlayerId};
use scribe_core::detection::FilterPolicy;

// ═══════════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Policy {
    /// Only effects known to the signature registry (default)
    #[default]
    Registry,
    /// Anything except the analyzed ability itself
    ExcludeBase,
    /// Every effect event
    All,
}

impl From<Policy> for FilterPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Registry => FilterPolicy::RegistryOnly,
            Policy::ExcludeBase => FilterPolicy::ExcludeBase,
            Policy::All => FilterPolicy::Permissive,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "scribe-detect")]
#[command(about = "Detect signature scripts on scribed abilities from combat events")]
#[command(version)]
struct Args {
    /// Fight events JSON file
    #[arg(short, long)]
    events: PathBuf,

    /// Scribing data file or directory (defaults to bundled tables)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Detection config TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only analyze this player
    #[arg(short, long)]
    player: Option<PlayerId>,

    /// Only analyze this ability
    #[arg(short, long)]
    ability: Option<AbilityId>,

    /// Candidate effect filter
    #[arg(long, value_enum, default_value_t = Policy::Registry)]
    policy: Policy,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    logging::init(args.verbose);

    let ctx = CliContext::load(
        args.config.as_deref(),
        args.data.as_deref(),
        args.policy.into(),
    )?;
    let fight = commands::load_fight(&args.events)?;

    let detections = commands::detect(&ctx, &fight, args.player, args.ability);
    commands::write_report(&mut std::io::stdout().lock(), &detections, args.pretty)
}
