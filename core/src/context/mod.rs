//! Runtime configuration
//!
//! Detection tuning lives in a small TOML file. Every key is optional and a
//! missing file means defaults.

mod config;
mod error;

pub use config::DetectionConfig;
pub use error::ConfigError;
