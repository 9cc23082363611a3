//! Scale gizmo: cube-tipped axes, plane quads and a center cube for uniform
//! scaling.

use glam::{DMat4, DVec3, Mat4, Vec3};
use manip_core::constants::STEP_EPSILON;
use manip_core::utils::{compute_pick_ray, compute_screen_factor, compute_view_frustum, orthonormalized_rotation};
use manip_core::{IntersectionKind, ViewportView};
use serde::{Deserialize, Serialize};

use crate::colors::{self, HandleColor};
use crate::draw::shapes::{draw_cube, draw_outlined_quad};
use crate::draw::{DrawManager, Drawable, PrimitiveType};
use crate::manipulator::{DrawFrame, HandleIds, HandleMode, Manipulator, MouseEvent, translation};

const CUBE_SIZE: f32 = 0.05;
const AXIS_HIDE_DOT: f64 = 0.99;
const PLANE_HIDE_DOT: f64 = 0.2;
/// Scale change per unit of horizontal NDC travel for uniform scaling
const UNIFORM_SPEED: f64 = 5.0;

const XY_QUAD: [Vec3; 4] = [
    Vec3::new(0.4, 0.4, 0.0),
    Vec3::new(0.6, 0.4, 0.0),
    Vec3::new(0.6, 0.6, 0.0),
    Vec3::new(0.4, 0.6, 0.0),
];
const XZ_QUAD: [Vec3; 4] = [
    Vec3::new(0.4, 0.0, 0.4),
    Vec3::new(0.6, 0.0, 0.4),
    Vec3::new(0.6, 0.0, 0.6),
    Vec3::new(0.4, 0.0, 0.6),
];
const YZ_QUAD: [Vec3; 4] = [
    Vec3::new(0.0, 0.4, 0.4),
    Vec3::new(0.0, 0.6, 0.4),
    Vec3::new(0.0, 0.6, 0.6),
    Vec3::new(0.0, 0.4, 0.6),
];

/// Handle being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleMode {
    /// No drag in progress
    #[default]
    None,
    /// Along the gizmo X axis
    X,
    /// Along the gizmo Y axis
    Y,
    /// Along the gizmo Z axis
    Z,
    /// X and Y together
    XY,
    /// X and Z together
    XZ,
    /// Y and Z together
    YZ,
    /// Uniform scale driven by horizontal mouse travel
    XYZ,
}

impl HandleMode for ScaleMode {
    const HANDLES: &'static [Self] = &[
        ScaleMode::X,
        ScaleMode::Y,
        ScaleMode::Z,
        ScaleMode::XY,
        ScaleMode::XZ,
        ScaleMode::YZ,
        ScaleMode::XYZ,
    ];
}

impl ScaleMode {
    fn local_direction(self) -> DVec3 {
        match self {
            ScaleMode::X | ScaleMode::YZ => DVec3::X,
            ScaleMode::Y | ScaleMode::XZ => DVec3::Y,
            ScaleMode::Z | ScaleMode::XY => DVec3::Z,
            ScaleMode::None | ScaleMode::XYZ => DVec3::ZERO,
        }
    }

    fn axis_index(self) -> Option<usize> {
        match self {
            ScaleMode::X => Some(0),
            ScaleMode::Y => Some(1),
            ScaleMode::Z => Some(2),
            _ => None,
        }
    }

    /// Axis left untouched by a plane handle
    fn plane_normal_index(self) -> Option<usize> {
        match self {
            ScaleMode::YZ => Some(0),
            ScaleMode::XZ => Some(1),
            ScaleMode::XY => Some(2),
            _ => None,
        }
    }

    fn intersection_kind(self) -> IntersectionKind {
        match self {
            ScaleMode::XYZ => IntersectionKind::ScreenSpace,
            _ if self.axis_index().is_some() => IntersectionKind::Axis,
            _ => IntersectionKind::Plane,
        }
    }

    fn drives(self, handle: ScaleMode) -> bool {
        let driven: &[ScaleMode] = match self {
            ScaleMode::None => &[],
            ScaleMode::X => &[ScaleMode::X],
            ScaleMode::Y => &[ScaleMode::Y],
            ScaleMode::Z => &[ScaleMode::Z],
            ScaleMode::XY => &[ScaleMode::X, ScaleMode::Y, ScaleMode::XY],
            ScaleMode::XZ => &[ScaleMode::X, ScaleMode::Z, ScaleMode::XZ],
            ScaleMode::YZ => &[ScaleMode::Y, ScaleMode::Z, ScaleMode::YZ],
            ScaleMode::XYZ => &[ScaleMode::X, ScaleMode::Y, ScaleMode::Z, ScaleMode::XYZ],
        };
        driven.contains(&handle)
    }

    fn base_color(self) -> HandleColor {
        match self {
            ScaleMode::X | ScaleMode::YZ => HandleColor::plane(colors::X_AXIS),
            ScaleMode::Y | ScaleMode::XZ => HandleColor::plane(colors::Y_AXIS),
            ScaleMode::Z | ScaleMode::XY => HandleColor::plane(colors::Z_AXIS),
            ScaleMode::None | ScaleMode::XYZ => HandleColor::plane(colors::SCALE_XYZ),
        }
    }
}

/// How [`ScaleManipulator::delta`] rounds the drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// Continuous scaling
    #[default]
    Off,
    /// The scale change lands on step multiples
    Relative,
    /// The resulting scale lands on step multiples
    Absolute,
}

/// Transform state the scale gizmo is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleGizmoData {
    /// Gizmo frame in world space
    pub gizmo_matrix: DMat4,
    /// Current scale of the edited object, used by absolute stepping
    pub scale: DVec3,
}

impl Default for ScaleGizmoData {
    fn default() -> Self {
        Self {
            gizmo_matrix: DMat4::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

fn step_component(delta: f64, step: f64, scale: f64, mode: StepMode) -> f64 {
    if delta.abs() < STEP_EPSILON {
        return 1.0;
    }
    let div = delta / step;
    let integer = div.trunc();
    let stepped = step * integer + step * (div - integer).ceil();

    match mode {
        StepMode::Absolute if scale.abs() < STEP_EPSILON => stepped + 1.0,
        StepMode::Absolute => (stepped + scale) / scale,
        _ if stepped.abs() < STEP_EPSILON => 1.0,
        _ => stepped,
    }
}

/// Scale manipulator
#[derive(Debug, Clone)]
pub struct ScaleManipulator {
    gizmo_data: ScaleGizmoData,
    mode: ScaleMode,
    locked: bool,
    step_mode: StepMode,
    step: f64,
    handles: HandleIds<ScaleMode>,
    view_projection: DMat4,
    drag_direction: DVec3,
    start_drag_point: DVec3,
    inv_gizmo_matrix: DMat4,
    intersection: IntersectionKind,
    delta: DVec3,
}

impl Default for ScaleManipulator {
    fn default() -> Self {
        Self {
            gizmo_data: ScaleGizmoData::default(),
            mode: ScaleMode::None,
            locked: false,
            step_mode: StepMode::Off,
            step: 1.0,
            handles: HandleIds::default(),
            view_projection: DMat4::IDENTITY,
            drag_direction: DVec3::ZERO,
            start_drag_point: DVec3::ZERO,
            inv_gizmo_matrix: DMat4::IDENTITY,
            intersection: IntersectionKind::Axis,
            delta: DVec3::ZERO,
        }
    }
}

impl ScaleManipulator {
    /// Manipulator with identity gizmo data
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gizmo data
    pub fn gizmo_data(&self) -> &ScaleGizmoData {
        &self.gizmo_data
    }

    /// Current gizmo frame
    pub fn gizmo_matrix(&self) -> &DMat4 {
        &self.gizmo_data.gizmo_matrix
    }

    /// Replace the gizmo data, resetting the drag delta
    pub fn set_gizmo_data(&mut self, gizmo_data: ScaleGizmoData) {
        self.gizmo_data = gizmo_data;
        self.delta = DVec3::ZERO;
    }

    /// Per-axis scale factor of the drag, `1.0` meaning unchanged
    pub fn delta(&self) -> DVec3 {
        match self.step_mode {
            StepMode::Off => self.delta + DVec3::ONE,
            mode => DVec3::new(
                step_component(self.delta.x, self.step, self.gizmo_data.scale.x, mode),
                step_component(self.delta.y, self.step, self.gizmo_data.scale.y, mode),
                step_component(self.delta.z, self.step, self.gizmo_data.scale.z, mode),
            ),
        }
    }

    /// Handle being dragged
    pub fn scale_mode(&self) -> ScaleMode {
        self.mode
    }

    /// Whether interaction is disabled
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Disable or enable interaction
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Current rounding mode
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Change the rounding mode
    pub fn set_step_mode(&mut self, step_mode: StepMode) {
        self.step_mode = step_mode;
    }

    /// Scale step
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set the scale step; a zero step falls back to 1
    pub fn set_step(&mut self, step: f64) {
        let step = if step.abs() < STEP_EPSILON { 1.0 } else { step };
        self.step = step.abs();
    }

    /// Whether a gizmo frame has been set
    pub fn is_valid(&self) -> bool {
        self.gizmo_data.gizmo_matrix != DMat4::ZERO
    }

    /// Selection id of a handle, zero before the first draw
    pub fn handle_id(&self, mode: ScaleMode) -> u32 {
        self.handles.id(mode)
    }

    fn intersect(&self, view: &ViewportView, event: &MouseEvent) -> Option<DVec3> {
        self.intersection.intersect(
            view,
            translation(&self.gizmo_data.gizmo_matrix),
            self.drag_direction,
            &self.view_projection,
            event.x,
            event.y,
        )
    }

    fn handle_color(&self, handle: ScaleMode, hovered: Option<ScaleMode>) -> HandleColor {
        if self.locked {
            return HandleColor::LOCKED;
        }
        if self.mode == ScaleMode::None && hovered == Some(handle) {
            return HandleColor::LOCATED;
        }
        if self.mode.drives(handle) {
            return HandleColor::SELECTED;
        }
        handle.base_color()
    }

    /// Axis line with a cube at its tip
    fn draw_axis(&self, draw_manager: &mut dyn DrawManager, mvp: Mat4, model: Mat4, color: HandleColor, axis: Vec3, id: u32) {
        draw_manager.submit(
            Drawable::new(PrimitiveType::Lines, vec![Vec3::ZERO, axis])
                .with_color(color.color)
                .with_mvp(mvp)
                .with_line_width(2.0)
                .with_selection_id(id),
        );
        let tip = Mat4::from_translation(axis);
        draw_cube(draw_manager, mvp * tip, model * tip, color.color, CUBE_SIZE, 0, id);
    }
}

impl Manipulator for ScaleManipulator {
    fn on_mouse_press(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) {
        if !view.is_valid() {
            tracing::warn!("Ignoring scale press on an invalid viewport");
            return;
        }
        if self.locked {
            return;
        }

        self.mode = ScaleMode::None;
        let Some(mode) = self.handles.mode(draw_manager.current_selection()) else {
            return;
        };
        self.mode = mode;

        let gizmo = self.gizmo_data.gizmo_matrix;
        self.drag_direction = match mode {
            ScaleMode::XYZ => compute_pick_ray(view, event.x, event.y).direction,
            _ => (orthonormalized_rotation(&gizmo) * mode.local_direction()).normalize_or_zero(),
        };
        self.intersection = mode.intersection_kind();
        self.view_projection = compute_view_frustum(view).view_projection();

        let screen_factor = compute_screen_factor(view, translation(&gizmo));
        self.inv_gizmo_matrix = (gizmo * DMat4::from_scale(DVec3::splat(screen_factor))).inverse();

        match self.intersect(view, event) {
            Some(point) if mode == ScaleMode::XYZ => self.start_drag_point = point,
            Some(point) => self.start_drag_point = self.inv_gizmo_matrix.transform_point3(point),
            None => tracing::debug!(?mode, "Scale drag started without a valid intersection"),
        }
        tracing::debug!(?mode, start = ?self.start_drag_point, "Scale drag started");
    }

    fn on_mouse_move(&mut self, event: &MouseEvent, view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode == ScaleMode::None || self.locked || !view.is_valid() {
            return;
        }
        let Some(point) = self.intersect(view, event) else {
            return;
        };

        if self.mode == ScaleMode::XYZ {
            // Horizontal travel only
            self.delta = DVec3::splat(UNIFORM_SPEED * (point.x - self.start_drag_point.x));
        } else {
            let local = self.inv_gizmo_matrix.transform_point3(point) - self.start_drag_point;
            if let Some(index) = self.mode.axis_index() {
                self.delta = DVec3::ZERO;
                self.delta[index] = local[index];
            } else if let Some(index) = self.mode.plane_normal_index() {
                self.delta = DVec3::splat(local.element_sum());
                self.delta[index] = 0.0;
            }
        }
        tracing::trace!(delta = ?self.delta, "Scale drag updated");
    }

    fn on_mouse_release(&mut self, _event: &MouseEvent, _view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode != ScaleMode::None {
            tracing::debug!(mode = ?self.mode, delta = ?self.delta(), "Scale drag ended");
        }
        self.mode = ScaleMode::None;
        self.delta = DVec3::ZERO;
    }

    fn draw(&mut self, view: &ViewportView, draw_manager: &mut dyn DrawManager) {
        if !self.is_valid() {
            return;
        }
        let center = translation(&self.gizmo_data.gizmo_matrix);
        let Some(frame) = DrawFrame::new(view, center) else {
            return;
        };
        self.view_projection = frame.view_proj;

        let delta = self.delta().as_vec3();
        let model = self.gizmo_data.gizmo_matrix * DMat4::from_scale(DVec3::splat(frame.screen_factor));
        let mvp = (frame.view_proj * model).as_mat4();
        let model_f = model.as_mat4();

        self.handles.ensure(draw_manager);
        let hovered = self.handles.mode(draw_manager.current_selection());
        let color = |handle| self.handle_color(handle, hovered);

        let view_dir = self
            .gizmo_data
            .gizmo_matrix
            .inverse()
            .transform_point3(frame.frustum.position)
            .normalize_or_zero();
        let axes = [Vec3::X * delta, Vec3::Y * delta, Vec3::Z * delta];
        let visible = |axis: Vec3| view_dir.dot(axis.normalize_or_zero().as_dvec3()).abs();

        for (handle, axis) in [ScaleMode::X, ScaleMode::Y, ScaleMode::Z].into_iter().zip(axes) {
            if visible(axis) < AXIS_HIDE_DOT {
                self.draw_axis(draw_manager, mvp, model_f, color(handle), axis, self.handles.id(handle));
            }
        }

        let planes = [
            (ScaleMode::XY, axes[2], &XY_QUAD),
            (ScaleMode::XZ, axes[1], &XZ_QUAD),
            (ScaleMode::YZ, axes[0], &YZ_QUAD),
        ];
        for (handle, normal, quad) in planes {
            let shown = self.mode == ScaleMode::None || self.mode == handle;
            if !shown || visible(normal) <= PLANE_HIDE_DOT {
                continue;
            }
            // Move the quad center to where the scale takes it
            let quad_center = quad.iter().copied().sum::<Vec3>() / quad.len() as f32;
            let offset = quad_center * delta - quad_center;
            let shifted: Vec<Vec3> = quad.iter().map(|v| *v + offset).collect();
            let c = color(handle);
            draw_outlined_quad(draw_manager, mvp, c.transparent, c.color, &shifted, 1.0, 1, self.handles.id(handle));
        }

        draw_cube(
            draw_manager,
            mvp,
            model_f,
            color(ScaleMode::XYZ).color,
            CUBE_SIZE,
            1,
            self.handles.id(ScaleMode::XYZ),
        );
    }

    fn is_picked(&self) -> bool {
        self.mode != ScaleMode::None
    }
}
