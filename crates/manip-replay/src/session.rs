//! Recorded manipulator sessions and their headless replay

use std::path::Path;

use glam::{DMat4, DVec3};
use manip_core::{
    Frustum, ManipulatorSettings, Projection, Rotation, RotationOrder, SettingsProvider, SnapMode,
    ViewportDimensions, ViewportView, constants::keys, create_snap_strategy,
};
use manip_gizmo::{
    DrawList, GizmoData, Manipulator, MouseEvent, MoveManipulator, MoveMode, Orientation, RotateManipulator,
    RotateMode, ScaleGizmoData, ScaleManipulator, ScaleMode, StepMode,
};
use serde::{Deserialize, Serialize};

/// Camera a session was recorded with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub projection: Projection,
    pub position: DVec3,
    pub target: DVec3,
    #[serde(default = "default_up")]
    pub up: DVec3,
    /// Vertical field of view in degrees (perspective only)
    #[serde(default = "default_fov")]
    pub fov: f64,
    /// Visible height in view units (orthographic only)
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_near")]
    pub near: f64,
    #[serde(default = "default_far")]
    pub far: f64,
}

fn default_up() -> DVec3 {
    DVec3::Y
}

fn default_fov() -> f64 {
    45.0
}

fn default_height() -> f64 {
    20.0
}

fn default_near() -> f64 {
    0.1
}

fn default_far() -> f64 {
    1000.0
}

fn default_scale() -> DVec3 {
    DVec3::ONE
}

impl CameraConfig {
    /// Frustum for a viewport of the given aspect ratio
    pub fn frustum(&self, aspect: f64) -> Frustum {
        match self.projection {
            Projection::Perspective => {
                Frustum::perspective(self.position, self.target, self.up, self.fov, aspect, self.near, self.far)
            }
            Projection::Orthographic => {
                Frustum::orthographic(self.position, self.target, self.up, self.height, aspect, self.near, self.far)
            }
        }
    }
}

/// Which gizmo a session drives, with its tool options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ManipulatorConfig {
    Move {
        /// Handle under the mouse at press time
        handle: MoveMode,
        #[serde(default)]
        snap: SnapMode,
        /// Snap step, the `move_step` setting if omitted
        #[serde(default)]
        step: Option<f64>,
    },
    Rotate {
        handle: RotateMode,
        #[serde(default)]
        orientation: Orientation,
        /// Angle step in degrees; stepping is off if omitted
        #[serde(default)]
        step: Option<f64>,
        #[serde(default)]
        gizmo_angles: DVec3,
        #[serde(default)]
        rotation_order: RotationOrder,
    },
    Scale {
        handle: ScaleMode,
        #[serde(default)]
        step_mode: StepMode,
        /// Scale step, the `scale_step` setting if omitted
        #[serde(default)]
        step: Option<f64>,
        /// Scale of the edited object
        #[serde(default = "default_scale")]
        scale: DVec3,
    },
}

/// Recorded mouse input in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Press { x: i32, y: i32 },
    Move { x: i32, y: i32 },
    Release { x: i32, y: i32 },
}

impl SessionEvent {
    fn mouse_event(&self) -> MouseEvent {
        match *self {
            Self::Press { x, y } | Self::Move { x, y } | Self::Release { x, y } => MouseEvent::new(x, y),
        }
    }
}

/// A recorded drag: camera, gizmo and the input that drove it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub camera: CameraConfig,
    pub viewport: ViewportDimensions,
    #[serde(default)]
    pub gizmo_matrix: DMat4,
    pub manipulator: ManipulatorConfig,
    pub events: Vec<SessionEvent>,
}

/// Manipulator output after one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReplayDelta {
    Translation(DVec3),
    Rotation(Rotation),
    Scale(DVec3),
}

/// State observed after replaying one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayStep {
    pub event: SessionEvent,
    /// Whether a drag was active after the event
    pub picked: bool,
    pub delta: ReplayDelta,
    pub gizmo_matrix: DMat4,
}

impl Session {
    /// Save the session to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ReplayError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize the session to pretty-printed RON
    pub fn to_ron_string(&self) -> Result<String, ReplayError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ReplayError::Serialize(e.to_string()))
    }

    /// Load a session from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReplayError::Io(e.to_string()))?;
        let session = Self::from_ron_str(&content)?;
        tracing::info!(path = %path.display(), events = session.events.len(), "Loaded session");
        Ok(session)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ReplayError> {
        let session: Self = ron::from_str(content).map_err(|e| ReplayError::Deserialize(e.to_string()))?;
        session.validate()?;
        Ok(session)
    }

    fn validate(&self) -> Result<(), ReplayError> {
        if !self.viewport.is_valid() {
            return Err(ReplayError::InvalidSession(format!(
                "viewport {}x{} has no area",
                self.viewport.width, self.viewport.height
            )));
        }
        if self.camera.position.distance(self.camera.target) <= f64::EPSILON {
            return Err(ReplayError::InvalidSession("camera looks at its own position".into()));
        }
        if self.gizmo_matrix.determinant().abs() <= f64::EPSILON {
            return Err(ReplayError::InvalidSession("gizmo matrix is singular".into()));
        }
        Ok(())
    }

    /// Viewport state the session is replayed in
    pub fn view(&self, settings: &dyn SettingsProvider) -> ViewportView {
        let frustum = self.camera.frustum(self.viewport.aspect_ratio());
        ViewportView::new(frustum, self.viewport).with_settings(settings)
    }

    /// Drive the configured manipulator through the recorded events.
    ///
    /// Each event is preceded by a redraw, the way a host repaints between
    /// input events, so handle ids exist before the first press.
    pub fn replay(&self, settings: &dyn SettingsProvider) -> Result<Vec<ReplayStep>, ReplayError> {
        self.validate()?;
        let view = self.view(settings);
        let mut active = ActiveManipulator::from_session(self, settings);
        let mut list = DrawList::new();

        let mut steps = Vec::with_capacity(self.events.len());
        for event in &self.events {
            list.clear();
            active.as_manipulator().draw(&view, &mut list);
            list.set_current_selection(active.hovered_id());

            let mouse = event.mouse_event();
            let manipulator = active.as_manipulator();
            match event {
                SessionEvent::Press { .. } => manipulator.on_mouse_press(&mouse, &view, &list),
                SessionEvent::Move { .. } => manipulator.on_mouse_move(&mouse, &view, &list),
                SessionEvent::Release { .. } => manipulator.on_mouse_release(&mouse, &view, &list),
            }

            let step = ReplayStep {
                event: *event,
                picked: active.as_manipulator().is_picked(),
                delta: active.delta(),
                gizmo_matrix: active.gizmo_matrix(),
            };
            tracing::debug!(?event, picked = step.picked, delta = ?step.delta, "Replayed event");
            steps.push(step);
        }
        Ok(steps)
    }
}

/// The manipulator a session drives plus the handle it hovers
#[derive(Debug)]
enum ActiveManipulator {
    Move(MoveManipulator, MoveMode),
    Rotate(RotateManipulator, RotateMode),
    Scale(ScaleManipulator, ScaleMode),
}

impl ActiveManipulator {
    fn from_session(session: &Session, settings: &dyn SettingsProvider) -> Self {
        match session.manipulator {
            ManipulatorConfig::Move { handle, snap, step } => {
                let step = step.unwrap_or_else(|| settings.get_f64_or(keys::MOVE_STEP, 1.0));
                let mut manipulator = MoveManipulator::new();
                manipulator.set_gizmo_matrix(session.gizmo_matrix);
                manipulator.set_snap_strategy(create_snap_strategy(snap, step, settings));
                Self::Move(manipulator, handle)
            }
            ManipulatorConfig::Rotate {
                handle,
                orientation,
                step,
                gizmo_angles,
                rotation_order,
            } => {
                let mut manipulator = RotateManipulator::new();
                manipulator.set_gizmo_data(GizmoData {
                    gizmo_matrix: session.gizmo_matrix,
                    gizmo_angles,
                    rotation_order,
                    ..Default::default()
                });
                manipulator.set_orientation(orientation);
                if let Some(step) = step {
                    manipulator.set_step(step);
                    manipulator.enable_step_mode(true);
                }
                Self::Rotate(manipulator, handle)
            }
            ManipulatorConfig::Scale {
                handle,
                step_mode,
                step,
                scale,
            } => {
                let mut manipulator = ScaleManipulator::new();
                manipulator.set_gizmo_data(ScaleGizmoData {
                    gizmo_matrix: session.gizmo_matrix,
                    scale,
                });
                manipulator.set_step_mode(step_mode);
                manipulator.set_step(step.unwrap_or_else(|| settings.get_f64_or(keys::SCALE_STEP, 1.0)));
                Self::Scale(manipulator, handle)
            }
        }
    }

    fn as_manipulator(&mut self) -> &mut dyn Manipulator {
        match self {
            Self::Move(m, _) => m,
            Self::Rotate(m, _) => m,
            Self::Scale(m, _) => m,
        }
    }

    fn hovered_id(&self) -> u32 {
        match self {
            Self::Move(m, handle) => m.handle_id(*handle),
            Self::Rotate(m, handle) => m.handle_id(*handle),
            Self::Scale(m, handle) => m.handle_id(*handle),
        }
    }

    fn delta(&self) -> ReplayDelta {
        match self {
            Self::Move(m, _) => ReplayDelta::Translation(m.delta()),
            Self::Rotate(m, _) => ReplayDelta::Rotation(m.delta()),
            Self::Scale(m, _) => ReplayDelta::Scale(m.delta()),
        }
    }

    fn gizmo_matrix(&self) -> DMat4 {
        match self {
            Self::Move(m, _) => *m.gizmo_matrix(),
            Self::Rotate(m, _) => *m.gizmo_matrix(),
            Self::Scale(m, _) => *m.gizmo_matrix(),
        }
    }
}

/// Settings for a replay: the file given on the command line, or defaults
pub fn load_settings(path: Option<&Path>) -> Result<ManipulatorSettings, ReplayError> {
    match path {
        Some(path) => ManipulatorSettings::load(path).map_err(|e| ReplayError::Config(e.to_string())),
        None => Ok(ManipulatorSettings::default()),
    }
}

/// Session replay errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReplayError {
    #[error("Settings error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}
