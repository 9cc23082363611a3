//! Headless replay of recorded manipulator drags
//!
//! A session file records a camera, a gizmo transform, which manipulator
//! handle was grabbed and the mouse events of the drag. [`Session::replay`]
//! drives the manipulator through those events against an in-memory
//! draw list and reports the delta after each one.

pub mod session;

pub use session::{
    CameraConfig, ManipulatorConfig, ReplayDelta, ReplayError, ReplayStep, Session, SessionEvent, load_settings,
};
