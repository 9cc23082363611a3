//! Snap strategies for drag manipulation

use std::sync::Arc;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{STEP_EPSILON, keys};
use crate::settings::SettingsProvider;

/// Converts a raw drag into a snapped world-space point
pub trait SnapStrategy: std::fmt::Debug + Send + Sync {
    /// Snapped position for an object that started at `start_pos`, dragged
    /// from `start_drag` to `cur_drag`
    fn get_snap_point(&self, start_pos: DVec3, start_drag: DVec3, cur_drag: DVec3) -> DVec3;
}

/// Snap strategy shared between the manipulators of one tool
pub type SharedSnapStrategy = Arc<dyn SnapStrategy>;

fn sanitize_step(step: f64) -> f64 {
    if step.abs() < STEP_EPSILON { 1.0 } else { step }
}

fn round_to_step(value: DVec3, step: f64) -> DVec3 {
    (value / step).round() * step
}

/// Snaps the drag delta to multiples of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeSnapStrategy {
    step: f64,
}

impl RelativeSnapStrategy {
    pub fn new(step: f64) -> Self {
        Self {
            step: sanitize_step(step),
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl SnapStrategy for RelativeSnapStrategy {
    fn get_snap_point(&self, start_pos: DVec3, start_drag: DVec3, cur_drag: DVec3) -> DVec3 {
        start_pos + round_to_step(cur_drag - start_drag, self.step)
    }
}

/// Snaps the resulting position to multiples of a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsoluteSnapStrategy {
    step: f64,
}

impl AbsoluteSnapStrategy {
    pub fn new(step: f64) -> Self {
        Self {
            step: sanitize_step(step),
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl SnapStrategy for AbsoluteSnapStrategy {
    fn get_snap_point(&self, start_pos: DVec3, start_drag: DVec3, cur_drag: DVec3) -> DVec3 {
        round_to_step(start_pos + (cur_drag - start_drag), self.step)
    }
}

/// Snap mode selectable by the move tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapMode {
    #[default]
    Off,
    Relative,
    Absolute,
    /// Absolute snapping to the viewport grid, if the grid is enabled
    Grid,
}

/// Build the strategy for a snap mode.
///
/// `step` is used by the relative and absolute modes; grid snapping reads
/// its step from the settings.
pub fn create_snap_strategy(
    mode: SnapMode,
    step: f64,
    settings: &dyn SettingsProvider,
) -> Option<SharedSnapStrategy> {
    match mode {
        SnapMode::Off => None,
        SnapMode::Relative => Some(Arc::new(RelativeSnapStrategy::new(step))),
        SnapMode::Absolute => Some(Arc::new(AbsoluteSnapStrategy::new(step))),
        SnapMode::Grid => {
            if settings.get_bool_or(keys::GRID_ENABLE, false) {
                let grid_step = settings.get_f64_or(keys::GRID_MIN_STEP, 1.0);
                Some(Arc::new(AbsoluteSnapStrategy::new(grid_step)))
            } else {
                tracing::debug!("Grid snapping requested with the grid disabled");
                None
            }
        }
    }
}
