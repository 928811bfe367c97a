//! Kernel tuning options with TOML file support.
//!
//! Defaults reproduce the fixed constants of the editor (near 0.1, far 10,
//! speed multiplier range 0.1..=5). Options serialize to/from TOML so a
//! deployment can override individual sections.

mod simulation;
mod vision;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use simulation::SimulationOptions;
pub use vision::VisionOptions;

use crate::error::VisionLabError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[vision]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Playback clock parameters.
    pub simulation: SimulationOptions,
    /// Camera frustum parameters.
    pub vision: VisionOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    /// [`VisionLabError::OptionsParse`] when `content` is not valid options
    /// TOML.
    pub fn from_toml(content: &str) -> Result<Self, VisionLabError> {
        toml::from_str(content)
            .map_err(|e| VisionLabError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    /// [`VisionLabError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, VisionLabError> {
        let content = std::fs::read_to_string(path).map_err(VisionLabError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("Loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    /// [`VisionLabError::OptionsParse`] if serialization fails,
    /// [`VisionLabError::Io`] if the directory or file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VisionLabError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VisionLabError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VisionLabError::Io)?;
        }
        std::fs::write(path, content).map_err(VisionLabError::Io)
    }
}
