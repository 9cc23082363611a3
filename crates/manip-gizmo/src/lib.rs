//! Viewport manipulators
//!
//! This crate contains the interactive gizmos built on `manip-core`:
//! - MoveManipulator: axis, plane and free translation
//! - RotateManipulator: object, world and gimbal rotation rings
//! - ScaleManipulator: axis, plane and uniform scaling with stepping
//! - PivotEditor: pivot dragging through a command collaborator
//!
//! Manipulators draw through the [`DrawManager`] trait and never touch a
//! graphics API. [`DrawList`] is the in-memory implementation used by
//! headless hosts and tests.

pub mod colors;
pub mod draw;
pub mod manipulator;
pub mod move_manipulator;
pub mod pivot_editor;
pub mod rotate_manipulator;
pub mod scale_manipulator;

pub use draw::{DrawList, DrawManager, Drawable, NO_SELECTION, PaintStyle, PrimitiveType};
pub use manipulator::{HandleIds, HandleMode, Manipulator, MouseEvent};
pub use move_manipulator::{MoveManipulator, MoveMode};
pub use pivot_editor::{PivotCommand, PivotEditor, PivotInfo};
pub use rotate_manipulator::{GizmoData, Orientation, RotateManipulator, RotateMode};
pub use scale_manipulator::{ScaleGizmoData, ScaleManipulator, ScaleMode, StepMode};
