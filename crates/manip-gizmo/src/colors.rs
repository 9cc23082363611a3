//! Gizmo color palette

use glam::Vec4;

pub const X_AXIS: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const Y_AXIS: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const Z_AXIS: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

/// Handle being dragged
pub const SELECT: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
pub const SELECT_TRANSPARENT: Vec4 = Vec4::new(1.0, 1.0, 0.0, 0.5);

/// Handle under the mouse
pub const LOCATE: Vec4 = Vec4::new(1.0, 0.75, 0.5, 1.0);
pub const LOCATE_TRANSPARENT: Vec4 = Vec4::new(1.0, 0.75, 0.5, 0.5);

/// Manipulator locked
pub const LOCK: Vec4 = Vec4::new(0.4, 0.4, 0.4, 1.0);
pub const LOCK_TRANSPARENT: Vec4 = Vec4::new(0.4, 0.4, 0.4, 0.4);

/// Plane handles take the color of their normal axis
pub const PLANE_ALPHA: f32 = 0.4;

/// Free move handle
pub const MOVE_XYZ: Vec4 = Vec4::new(0.392, 0.863, 1.0, 1.0);

/// Uniform scale handle
pub const SCALE_XYZ: Vec4 = MOVE_XYZ;

pub const ROTATE_VIEW: Vec4 = Vec4::new(100.0 / 255.0, 220.0 / 255.0, 1.0, 1.0);
/// Free rotation disc outline
pub const ROTATE_XYZ: Vec4 = Vec4::new(64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0, 1.0);
/// Free rotation disc fill while hovered or dragged
pub const ROTATE_XYZ_LOCATE_FILL: Vec4 = Vec4::splat(0.25);
/// Swept rotation wedge
pub const PIE: Vec4 = Vec4::new(203.0 / 255.0, 203.0 / 255.0, 203.0 / 255.0, 1.0);

/// Outline and fill colors of one handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleColor {
    pub color: Vec4,
    pub transparent: Vec4,
}

impl HandleColor {
    pub const fn new(color: Vec4, transparent: Vec4) -> Self {
        Self { color, transparent }
    }

    /// Opaque color with a plane-style translucent fill
    pub fn plane(color: Vec4) -> Self {
        Self {
            color,
            transparent: color.truncate().extend(PLANE_ALPHA),
        }
    }

    pub const LOCKED: Self = Self::new(LOCK, LOCK_TRANSPARENT);
    pub const LOCATED: Self = Self::new(LOCATE, LOCATE_TRANSPARENT);
    pub const SELECTED: Self = Self::new(SELECT, SELECT);
}
