use std::path::{Path, PathBuf};
use std::sync::Arc;

use scribe_core::context::DetectionConfig;
use scribe_core::detection::{FilterPolicy, SignatureDetector};
use scribe_core::game_data::{KnownAbilityTable, ScribingData, SignatureRegistry};
use tracing::info;

/// Everything a detection run needs, resolved once at startup
#[derive(Debug, Clone)]
pub struct CliContext {
    pub detector: SignatureDetector,
    pub policy: FilterPolicy,
}

impl CliContext {
    /// Build the detector from an optional config file and data path.
    ///
    /// An explicit `data` path wins over the config's `data_path`; with
    /// neither, the bundled tables are used.
    pub fn load(
        config_path: Option<&Path>,
        data: Option<&Path>,
        policy: FilterPolicy,
    ) -> Result<Self, String> {
        let config = match config_path {
            Some(path) => DetectionConfig::load(path).map_err(|e| e.to_string())?,
            None => DetectionConfig::default(),
        };

        let data_path: Option<PathBuf> = data.map(Path::to_path_buf).or(config.data_path);

        let (registry, known) = match data_path {
            Some(path) => {
                let data = ScribingData::load_path(&path).map_err(|e| e.to_string())?;
                let registry = SignatureRegistry::from_data(&data);
                let known = KnownAbilityTable::from_data(&data);
                info!(
                    path = %path.display(),
                    signature_effects = registry.len(),
                    known_abilities = known.len(),
                    "Loaded scribing data"
                );
                (registry, known)
            }
            None => (SignatureRegistry::bundled(), KnownAbilityTable::bundled()),
        };

        Ok(Self {
            detector: SignatureDetector::with_settings(
                Arc::new(registry),
                Arc::new(known),
                config.detection,
            ),
            policy,
        })
    }
}
