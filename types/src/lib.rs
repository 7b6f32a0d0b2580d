//! Shared detection types for scribe
//!
//! This crate contains the serializable types handed across the engine
//! boundary: the settings that tune detection and the results returned to
//! whatever presentation layer consumes them (tooltips, reports, CLI output).

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Detection Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Post-cast window (ms) during which side effects are attributed to a cast
pub const DETECTION_WINDOW_MS: i64 = 1000;

/// Minimum fraction of casts a candidate must appear in to qualify
pub const MIN_CONSISTENCY: f64 = 0.5;

/// Highest confidence statistical detection may report.
/// 1.0 is reserved for exact ability-ID matches.
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Number of runner-up candidates listed in the evidence trail
pub const MAX_ADDITIONAL_EVIDENCE: usize = 3;

fn default_window_ms() -> i64 {
    DETECTION_WINDOW_MS
}

fn default_min_consistency() -> f64 {
    MIN_CONSISTENCY
}

fn default_confidence_ceiling() -> f64 {
    CONFIDENCE_CEILING
}

fn default_max_additional_evidence() -> usize {
    MAX_ADDITIONAL_EVIDENCE
}

/// Tunables for statistical signature detection.
///
/// Every field defaults to the documented engine constant, so an empty
/// config file yields the standard behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionSettings {
    /// Window length in milliseconds, closed on the right
    #[serde(default = "default_window_ms")]
    pub window_ms: i64,

    /// Consistency threshold, inclusive
    #[serde(default = "default_min_consistency")]
    pub min_consistency: f64,

    /// Cap applied to the primary candidate's consistency
    #[serde(default = "default_confidence_ceiling")]
    pub confidence_ceiling: f64,

    /// Runner-up lines in the evidence trail
    #[serde(default = "default_max_additional_evidence")]
    pub max_additional_evidence: usize,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            window_ms: DETECTION_WINDOW_MS,
            min_consistency: MIN_CONSISTENCY,
            confidence_ceiling: CONFIDENCE_CEILING,
            max_additional_evidence: MAX_ADDITIONAL_EVIDENCE,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection Results
// ─────────────────────────────────────────────────────────────────────────────

/// Detection method reported by the exact ability-ID resolver
pub const METHOD_ABILITY_ID_MATCH: &str = "ability-id-match";

/// Detection method reported by statistical post-cast analysis
pub const METHOD_POST_CAST_ANALYSIS: &str = "Post-Cast Pattern Analysis";

/// A scribed skill as recorded in the known-ability table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScribedRecipe {
    /// Base skill, e.g. "Soul Burst"
    pub grimoire: String,
    /// Transformation name, e.g. "Wield Soul"
    pub transformation: String,
    /// Kind of transformation, e.g. "Focus Script" or "Base Grimoire"
    pub transformation_type: String,
}

/// Outcome of a detection run.
///
/// Immutable once built: consumers display it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub script_name: String,
    /// 1.0 for exact matches, otherwise within (0, ceiling]
    pub confidence: f64,
    pub detection_method: String,
    /// Human-auditable trail, order is part of the contract
    pub evidence: Vec<String>,
    /// Present only for exact ability-ID matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe: Option<ScribedRecipe>,
}

impl DetectionResult {
    /// True when the result came from the known-ability table rather than inference
    pub fn is_exact_match(&self) -> bool {
        self.detection_method == METHOD_ABILITY_ID_MATCH
    }

    /// Confidence as a whole percentage for display
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_engine_constants() {
        let settings = DetectionSettings::default();
        assert_eq!(settings.window_ms, 1000);
        assert_eq!(settings.min_consistency, 0.5);
        assert_eq!(settings.confidence_ceiling, 0.95);
        assert_eq!(settings.max_additional_evidence, 3);
    }

    #[test]
    fn confidence_percent_rounds() {
        let result = DetectionResult {
            script_name: "Anchorite's Potency".to_string(),
            confidence: 0.95,
            detection_method: METHOD_POST_CAST_ANALYSIS.to_string(),
            evidence: Vec::new(),
            recipe: None,
        };
        assert_eq!(result.confidence_percent(), 95);
        assert!(!result.is_exact_match());
    }
}
