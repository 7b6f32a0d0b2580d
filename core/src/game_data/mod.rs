//! Static scribing game data
//!
//! - **scribing**: TOML data file format and loading
//! - **registry**: read-only lookup tables handed to the detection engine
//! - **bundled**: compile-time defaults used when no data files are supplied

mod bundled;
mod error;
mod registry;
mod scribing;

pub use bundled::{BundledSkill, SCRIBED_SKILLS, SIGNATURE_EFFECT_NAMES};
pub use error::DataError;
pub use registry::{
    BASE_ABILITY_NAME, BASE_GRIMOIRE_TYPE, KnownAbilityTable, SignatureRegistry,
    fallback_script_name,
};
pub use scribing::{
    GrimoireDefinition, GrimoireEffects, ScribingData, SignatureScriptDefinition,
    TransformationDefinition,
};
