//! Viewport manipulator geometry
//!
//! Toolkit-independent interaction math shared by the move, rotate and scale
//! manipulators: pick rays, axis/plane/sphere intersection, screen-space
//! gizmo scaling, Euler decomposition and snapping.
//!
//! # Module Structure
//!
//! ```text
//! manip-core/
//! ├── camera.rs     # Frustum, projection and window conforming
//! ├── ray.rs        # Pick ray and closest-point queries
//! ├── viewport.rs   # Viewport dimensions and per-frame view
//! ├── rotation.rs   # Axis/angle rotations, rotation orders, Euler angles
//! ├── utils.rs      # Manipulator intersection helpers
//! ├── snap.rs       # Snap strategies
//! ├── settings.rs   # Settings provider and RON-backed settings
//! └── constants.rs  # Tuned thresholds and setting keys
//! ```

pub mod camera;
pub mod constants;
pub mod ray;
pub mod rotation;
pub mod settings;
pub mod snap;
pub mod utils;
pub mod viewport;

pub use camera::{ConformPolicy, Frustum, Projection, Window};
pub use ray::Ray;
pub use rotation::{Rotation, RotationOrder};
pub use settings::{ConfigError, ManipulatorSettings, SettingsProvider};
pub use snap::{
    AbsoluteSnapStrategy, RelativeSnapStrategy, SharedSnapStrategy, SnapMode, SnapStrategy,
    create_snap_strategy,
};
pub use utils::IntersectionKind;
pub use viewport::{ViewportDimensions, ViewportView};
