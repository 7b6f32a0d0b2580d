//! Error types for signature detection

use thiserror::Error;

use crate::combat_log::{AbilityId, PlayerId};

/// Input contract violations. "Nothing detected" is not an error and is
/// reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionError {
    #[error("no casts supplied: at least one cast is required for detection")]
    NoCasts,

    #[error("cast at {timestamp}ms belongs to player {found}, expected player {expected}")]
    MixedCastSources {
        expected: PlayerId,
        found: PlayerId,
        timestamp: i64,
    },

    #[error("cast at {timestamp}ms is ability {found}, expected ability {expected}")]
    MixedCastAbilities {
        expected: AbilityId,
        found: AbilityId,
        timestamp: i64,
    },
}
