//! Built-in scribing tables used when no data files are supplied.
//!
//! Only entries confirmed against live logs live here; the full
//! tables come from the versioned data files.

use phf::phf_map;

/// Scribed skill entry of the built-in known-ability table
#[derive(Debug, Clone, Copy)]
pub struct BundledSkill {
    pub grimoire: &'static str,
    pub transformation: &'static str,
    pub transformation_type: &'static str,
}

impl BundledSkill {
    const fn new(
        grimoire: &'static str,
        transformation: &'static str,
        transformation_type: &'static str,
    ) -> Self {
        Self {
            grimoire,
            transformation,
            transformation_type,
        }
    }
}

/// Signature script names by the effect ID the log reports
pub static SIGNATURE_EFFECT_NAMES: phf::Map<i64, &'static str> = phf_map! {
    216940i64 => "Anchorite's Potency", // Potent Soul, ultimate gain via resource events
    252143i64 => "Class Mastery",       // Arcanist Crux/ultimate tick, absent from script tables
};

/// Scribed skills by the ability ID they are cast under
pub static SCRIBED_SKILLS: phf::Map<i64, BundledSkill> = phf_map! {
    217784i64 => BundledSkill::new("Soul Burst", "Wield Soul", "Focus Script"), // Leashing Soul
};
