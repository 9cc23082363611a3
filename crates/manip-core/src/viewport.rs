//! Viewport description handed to manipulators each frame

use serde::{Deserialize, Serialize};

use crate::camera::Frustum;
use crate::constants::{DEFAULT_GLOBAL_SCALE, keys};
use crate::settings::SettingsProvider;

/// Render target rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportDimensions {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ViewportDimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Width/height ratio, 1.0 for a zero height
    pub fn aspect_ratio(&self) -> f64 {
        if self.height != 0 {
            self.width as f64 / self.height as f64
        } else {
            1.0
        }
    }

    /// Whether the viewport has a drawable area
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Camera and viewport state for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportView {
    /// Camera frustum as configured by the host (not yet conformed)
    pub frustum: Frustum,
    pub dimensions: ViewportDimensions,
    /// Global gizmo size multiplier
    pub global_scale: f64,
}

impl ViewportView {
    pub fn new(frustum: Frustum, dimensions: ViewportDimensions) -> Self {
        Self {
            frustum,
            dimensions,
            global_scale: DEFAULT_GLOBAL_SCALE,
        }
    }

    /// Read the global gizmo scale from a settings provider
    pub fn with_settings(mut self, settings: &dyn SettingsProvider) -> Self {
        self.global_scale = settings.get_f64_or(keys::GLOBAL_SCALE, DEFAULT_GLOBAL_SCALE);
        self
    }

    /// Whether manipulators may interact with this view
    pub fn is_valid(&self) -> bool {
        self.dimensions.is_valid()
    }
}
