pub mod combat_log;
pub mod context;
pub mod detection;
pub mod game_data;
pub mod serde_defaults;

// Re-exports for convenience
pub use combat_log::*;
pub use context::{ConfigError, DetectionConfig};
pub use detection::{
    AbilityDetection, CandidateFilter, DetectionError, DetectionOutcome, FilterPolicy,
    SignatureDetector, analyze_fight,
};
pub use game_data::{DataError, KnownAbilityTable, ScribingData, SignatureRegistry};
pub use scribe_types::{DetectionResult, DetectionSettings, ScribedRecipe};
