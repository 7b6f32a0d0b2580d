//! Common serde default value functions
//!
//! Used across scribing data definitions to avoid duplication.

/// Default transformation type for grimoire transformations.
/// Every transformation in the scribing tables is a focus script.
pub fn default_transformation_type() -> String {
    "Focus Script".to_string()
}
