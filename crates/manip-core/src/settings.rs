//! Manipulator settings and the read-only settings provider boundary

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GLOBAL_SCALE, keys};

/// Read-only access to host settings by key
pub trait SettingsProvider {
    /// Numeric setting, `None` if unknown
    fn get_f64(&self, key: &str) -> Option<f64>;

    /// Boolean setting, `None` if unknown
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.get_f64(key).unwrap_or(default)
    }

    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

/// Viewport tool settings persisted as a RON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulatorSettings {
    /// Global gizmo size multiplier
    pub global_scale: f64,
    /// Grid snapping enabled
    pub grid_enabled: bool,
    /// Smallest grid cell size, used as the grid snap step
    pub grid_min_step: f64,
    pub move_step: f64,
    /// Degrees
    pub rotate_step: f64,
    pub scale_step: f64,
}

impl Default for ManipulatorSettings {
    fn default() -> Self {
        Self {
            global_scale: DEFAULT_GLOBAL_SCALE,
            grid_enabled: false,
            grid_min_step: 1.0,
            move_step: 1.0,
            rotate_step: 10.0,
            scale_step: 1.0,
        }
    }
}

impl ManipulatorSettings {
    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize settings to pretty-printed RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let settings = Self::from_ron_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded manipulator settings");
        Ok(settings)
    }

    /// Parse settings from RON text; missing fields take their defaults
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}

impl SettingsProvider for ManipulatorSettings {
    fn get_f64(&self, key: &str) -> Option<f64> {
        match key {
            keys::GLOBAL_SCALE => Some(self.global_scale),
            keys::GRID_MIN_STEP => Some(self.grid_min_step),
            keys::MOVE_STEP => Some(self.move_step),
            keys::ROTATE_STEP => Some(self.rotate_step),
            keys::SCALE_STEP => Some(self.scale_step),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match key {
            keys::GRID_ENABLE => Some(self.grid_enabled),
            _ => None,
        }
    }
}

/// Settings file errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
