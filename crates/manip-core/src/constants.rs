//! Global constants for manip-core
//!
//! The thresholds below are tuned for drag feel and must not be changed
//! to "nicer" values.

/// Pick rays closer than this (|cos|) to an axis are treated as parallel
pub const AXIS_PARALLEL_THRESHOLD: f64 = 0.99;

/// Pick rays below this |cos| against a plane normal are treated as parallel
pub const PLANE_PARALLEL_THRESHOLD: f64 = 0.01;

/// Decomposed Euler angles (degrees) closer than this to zero snap to zero
pub const EULER_ZERO_EPSILON: f64 = 1e-5;

/// Steps closer than this to zero are replaced by a default step
pub const STEP_EPSILON: f64 = 1e-6;

/// Gizmo centers closer than this to the camera eye are not drawn
pub const GIZMO_CAMERA_EPSILON: f64 = 1e-5;

/// Base screen-space size of a gizmo relative to clip-space W
pub const SCREEN_FACTOR_SCALE: f64 = 0.15;

/// Reference field of view (degrees) the base gizmo size was tuned for
pub const REFERENCE_FOV_DEGREES: f64 = 35.0;

/// Default value of the global manipulator scale setting
pub const DEFAULT_GLOBAL_SCALE: f64 = 1.0;

/// Setting keys understood by [`crate::settings::ManipulatorSettings`]
pub mod keys {
    /// Global gizmo size multiplier
    pub const GLOBAL_SCALE: &str = "viewport.manipulators.global_scale";
    /// Whether the viewport grid is enabled (grid snapping)
    pub const GRID_ENABLE: &str = "viewport.grid.enable";
    /// Smallest grid cell size
    pub const GRID_MIN_STEP: &str = "viewport.grid.min_step";
    /// Move tool snapping step
    pub const MOVE_STEP: &str = "viewport.move_tool.step";
    /// Rotate tool angle step (degrees)
    pub const ROTATE_STEP: &str = "viewport.rotate_tool.step";
    /// Scale tool step
    pub const SCALE_STEP: &str = "viewport.scale_tool.step";
}
