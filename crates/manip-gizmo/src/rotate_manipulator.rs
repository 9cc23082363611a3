//! Rotation gizmo: per-axis half rings, a view ring and a free trackball disc.
//!
//! In gimbal orientation each ring follows the Euler angles already applied
//! after it in the rotation order, and a drag only edits the matching
//! angle. Object and world orientation measure the drag in the gizmo frame
//! captured at press.

use glam::{DMat3, DMat4, DVec3, Vec3, Vec4};
use manip_core::constants::STEP_EPSILON;
use manip_core::utils::{compute_screen_factor, compute_sphere_intersection, compute_view_frustum};
use manip_core::utils::{orthonormalized_rotation, remove_scale_shear};
use manip_core::{Rotation, RotationOrder, ViewportView};
use serde::{Deserialize, Serialize};

use crate::colors::{self, HandleColor};
use crate::draw::shapes::{Plane, draw_arc, draw_circle, draw_circle_half, draw_outlined_circle};
use crate::draw::{DrawManager, Drawable, PrimitiveType};
use crate::manipulator::{DrawFrame, HandleIds, HandleMode, Manipulator, MouseEvent, translation};

const DEFAULT_STEP: f64 = 10.0;
/// View ring radius relative to the axis rings
const VIEW_RING_SCALE: f64 = 1.15;
const PIE_POINT_SIZE: f32 = 8.0;

/// Handle being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotateMode {
    /// No drag in progress
    #[default]
    None,
    /// About the X ring axis
    X,
    /// About the Y ring axis
    Y,
    /// About the Z ring axis
    Z,
    /// About the camera view direction
    View,
    /// Free trackball rotation
    XYZ,
}

impl HandleMode for RotateMode {
    const HANDLES: &'static [Self] = &[
        RotateMode::X,
        RotateMode::Y,
        RotateMode::Z,
        RotateMode::View,
        RotateMode::XYZ,
    ];
}

impl RotateMode {
    fn axis_index(self) -> Option<usize> {
        match self {
            RotateMode::X => Some(0),
            RotateMode::Y => Some(1),
            RotateMode::Z => Some(2),
            _ => None,
        }
    }
}

/// Frame the rotation rings are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Rings follow the object; the gizmo rotates live during a drag
    #[default]
    Object,
    /// Rings follow the gizmo frame but the gizmo is left untouched
    World,
    /// Rings follow the Euler angle chain; only the dragged angle changes
    Gimbal,
}

/// Transform state the rotate gizmo is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GizmoData {
    /// Gizmo frame in world space
    pub gizmo_matrix: DMat4,
    /// Frame of the parent, used by gimbal rings
    pub parent_gizmo_matrix: DMat4,
    /// Per-axis Euler angles in degrees
    pub gizmo_angles: DVec3,
    /// Order the Euler angles are applied in
    pub rotation_order: RotationOrder,
}

impl Default for GizmoData {
    fn default() -> Self {
        Self {
            gizmo_matrix: DMat4::IDENTITY,
            parent_gizmo_matrix: DMat4::IDENTITY,
            gizmo_angles: DVec3::ZERO,
            rotation_order: RotationOrder::Xyz,
        }
    }
}

/// Gimbal ring axis for basis `axis_index`: the basis vector carried by
/// every elemental rotation applied after it, then by the parent frame
fn gimbal_axis(data: &GizmoData, axis_index: usize) -> DVec3 {
    let angles = data.gizmo_angles;
    let rotations = [
        DMat3::from_rotation_x(angles.x.to_radians()),
        DMat3::from_rotation_y(angles.y.to_radians()),
        DMat3::from_rotation_z(angles.z.to_radians()),
    ];
    let order = data.rotation_order.basis_indices();
    let position = order.iter().position(|&i| i == axis_index).unwrap_or(order.len() - 1);

    let mut axis = DVec3::AXES[axis_index];
    for &i in &order[position + 1..] {
        axis = rotations[i] * axis;
    }
    orthonormalized_rotation(&data.parent_gizmo_matrix) * axis
}

/// Round the angle of `rotation` to a multiple of `step`
fn snap_to_step(rotation: Rotation, step: f64) -> Rotation {
    let div = rotation.angle() / step;
    let integer = div.trunc();
    Rotation::new(rotation.axis(), step * integer + step * (div - integer).round())
}

/// Rotation manipulator
#[derive(Debug, Clone)]
pub struct RotateManipulator {
    gizmo_data: GizmoData,
    start_matrix: DMat4,
    inv_start_matrix: DMat4,
    mode: RotateMode,
    orientation: Orientation,
    locked: bool,
    gizmo_locked: bool,
    step_mode: bool,
    step: f64,
    handles: HandleIds<RotateMode>,
    axis: DVec3,
    start_vector: DVec3,
    start_gizmo_angles: DVec3,
    delta: Rotation,
}

impl Default for RotateManipulator {
    fn default() -> Self {
        Self {
            gizmo_data: GizmoData::default(),
            start_matrix: DMat4::IDENTITY,
            inv_start_matrix: DMat4::IDENTITY,
            mode: RotateMode::None,
            orientation: Orientation::Object,
            locked: false,
            gizmo_locked: false,
            step_mode: false,
            step: DEFAULT_STEP,
            handles: HandleIds::default(),
            axis: DVec3::ZERO,
            start_vector: DVec3::ZERO,
            start_gizmo_angles: DVec3::ZERO,
            delta: Rotation::IDENTITY,
        }
    }
}

impl RotateManipulator {
    /// Manipulator with identity gizmo data
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gizmo data, updated live during object and gimbal drags
    pub fn gizmo_data(&self) -> &GizmoData {
        &self.gizmo_data
    }

    /// Current gizmo frame
    pub fn gizmo_matrix(&self) -> &DMat4 {
        &self.gizmo_data.gizmo_matrix
    }

    /// Replace the gizmo data and restart delta accumulation from it
    pub fn set_gizmo_data(&mut self, gizmo_data: GizmoData) {
        self.gizmo_data = gizmo_data;
        self.start_matrix = gizmo_data.gizmo_matrix;
        self.inv_start_matrix = self.start_matrix.inverse();
        self.delta = Rotation::IDENTITY;
    }

    /// Rotation since the drag started, rounded to the step in step mode.
    ///
    /// The axis is in the gizmo frame captured at press for object and
    /// world orientation, and in world space for gimbal orientation.
    pub fn delta(&self) -> Rotation {
        if self.step_mode {
            snap_to_step(self.delta, self.step)
        } else {
            self.delta
        }
    }

    /// Handle being dragged
    pub fn rotate_mode(&self) -> RotateMode {
        self.mode
    }

    /// Frame the rings are expressed in
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change the ring frame
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Whether interaction is disabled
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Disable or enable interaction
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Whether drags leave the gizmo itself untouched
    pub fn is_gizmo_locked(&self) -> bool {
        self.gizmo_locked
    }

    /// Keep the gizmo still while dragging, still reporting the delta
    pub fn set_gizmo_locked(&mut self, locked: bool) {
        self.gizmo_locked = locked;
    }

    /// Whether [`RotateManipulator::delta`] is rounded to the step
    pub fn is_step_mode_enabled(&self) -> bool {
        self.step_mode
    }

    /// Enable or disable angle stepping
    pub fn enable_step_mode(&mut self, enable: bool) {
        self.step_mode = enable;
    }

    /// Angle step in degrees
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set the angle step; a zero step falls back to 10 degrees
    pub fn set_step(&mut self, step: f64) {
        let step = if step.abs() < STEP_EPSILON { DEFAULT_STEP } else { step };
        self.step = step.abs();
    }

    /// Whether gizmo data has been set
    pub fn is_valid(&self) -> bool {
        self.start_matrix != DMat4::ZERO
    }

    /// Selection id of a handle, zero before the first draw
    pub fn handle_id(&self, mode: RotateMode) -> u32 {
        self.handles.id(mode)
    }

    fn sphere_vector(&self, view: &ViewportView, event: &MouseEvent) -> DVec3 {
        let center = translation(&self.gizmo_data.gizmo_matrix);
        let screen_factor = compute_screen_factor(view, center);
        compute_sphere_intersection(view, screen_factor, center, event.x, event.y) - center
    }

    fn handle_color(&self, handle: RotateMode, hovered: Option<RotateMode>) -> HandleColor {
        if self.locked {
            return HandleColor::new(colors::LOCK, Vec4::ZERO);
        }
        let active = if self.mode == RotateMode::None {
            hovered == Some(handle)
        } else {
            self.mode == handle
        };
        match (handle, active) {
            (RotateMode::XYZ, true) => HandleColor::new(colors::ROTATE_XYZ, colors::ROTATE_XYZ_LOCATE_FILL),
            (RotateMode::XYZ, false) => HandleColor::new(colors::ROTATE_XYZ, Vec4::ZERO),
            (_, true) if self.mode == RotateMode::None => HandleColor::new(colors::LOCATE, colors::LOCATE),
            (_, true) => HandleColor::SELECTED,
            (RotateMode::View, false) => HandleColor::new(colors::ROTATE_VIEW, Vec4::ZERO),
            (RotateMode::X, false) => HandleColor::plane(colors::X_AXIS),
            (RotateMode::Y, false) => HandleColor::plane(colors::Y_AXIS),
            (RotateMode::Z | RotateMode::None, false) => HandleColor::plane(colors::Z_AXIS),
        }
    }

    /// Swept wedge, its edges and their end points
    fn draw_pie(&self, draw_manager: &mut dyn DrawManager, vp: DMat4, radius: f64, axis: Vec3) {
        let axis_d = axis.as_dvec3();
        let v1 = (self.start_vector - axis_d * self.start_vector.dot(axis_d)).normalize_or_zero();
        let v2 = Rotation::new(axis_d, self.delta().angle()).transform_dir(v1).normalize_or_zero();
        let (v1, v2) = if v2.cross(v1).dot(axis_d) < 0.0 { (v2, v1) } else { (v1, v2) };
        let v1 = (v1 * radius).as_vec3();
        let v2 = (v2 * radius).as_vec3();

        let mvp = vp.as_mat4();
        draw_arc(draw_manager, mvp, colors::PIE, Vec3::ZERO, v1, v2, axis, radius as f32, 2);
        draw_manager.submit(
            Drawable::new(PrimitiveType::Lines, vec![Vec3::ZERO, v1, Vec3::ZERO, v2])
                .with_color(colors::PIE)
                .with_mvp(mvp)
                .with_depth_priority(2),
        );
        let points = [v1, v2, Vec3::ZERO].map(|p| mvp.project_point3(p)).to_vec();
        draw_manager.submit(
            Drawable::new(PrimitiveType::Points, points)
                .with_color(colors::PIE)
                .with_point_size(PIE_POINT_SIZE)
                .with_depth_priority(2),
        );
    }
}

impl Manipulator for RotateManipulator {
    fn on_mouse_press(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) {
        if !view.is_valid() {
            tracing::warn!("Ignoring rotate press on an invalid viewport");
            return;
        }
        if self.locked {
            return;
        }

        self.mode = RotateMode::None;
        let Some(mode) = self.handles.mode(draw_manager.current_selection()) else {
            return;
        };
        self.mode = mode;
        if self.orientation == Orientation::Gimbal && mode == RotateMode::XYZ {
            tracing::debug!("Free rotation is unavailable in gimbal orientation");
            return;
        }

        self.start_vector = self.sphere_vector(view, event);
        self.start_gizmo_angles = self.gizmo_data.gizmo_angles;

        let axis = match mode {
            RotateMode::View => {
                -self
                    .inv_start_matrix
                    .transform_vector3(compute_view_frustum(view).view_direction())
            }
            RotateMode::XYZ | RotateMode::None => DVec3::ZERO,
            _ => match (mode.axis_index(), self.orientation) {
                (Some(index), Orientation::Gimbal) => gimbal_axis(&self.gizmo_data, index),
                (Some(index), _) => DVec3::AXES[index],
                (None, _) => DVec3::ZERO,
            },
        };
        self.axis = axis.normalize_or_zero();
        tracing::debug!(?mode, orientation = ?self.orientation, axis = ?self.axis, "Rotate drag started");
    }

    fn on_mouse_move(&mut self, event: &MouseEvent, view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode == RotateMode::None || self.locked || !view.is_valid() {
            return;
        }
        if self.mode == RotateMode::XYZ && self.orientation == Orientation::Gimbal {
            return;
        }

        let end_vector = self.sphere_vector(view, event);
        if self.orientation == Orientation::Gimbal {
            self.delta = Rotation::rotate_onto_projected(self.start_vector, end_vector, self.axis);
            if let (Some(index), false) = (self.mode.axis_index(), self.gizmo_locked) {
                self.gizmo_data.gizmo_angles = self.start_gizmo_angles + DVec3::AXES[index] * self.delta().angle();
            }
        } else {
            let start = self.inv_start_matrix.transform_vector3(self.start_vector.normalize_or_zero());
            let end = self.inv_start_matrix.transform_vector3(end_vector.normalize_or_zero());
            self.delta = match self.mode {
                RotateMode::XYZ => Rotation::between(start, end),
                _ => Rotation::rotate_onto_projected(start, end, self.axis),
            };

            if self.orientation == Orientation::Object && !self.gizmo_locked {
                let rotated = self.start_matrix * DMat4::from_quat(self.delta().to_quat());
                self.gizmo_data.gizmo_matrix = remove_scale_shear(&rotated);
            }
        }
        tracing::trace!(angle = self.delta.angle(), axis = ?self.delta.axis(), "Rotate drag updated");
    }

    fn on_mouse_release(&mut self, _event: &MouseEvent, _view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode != RotateMode::None {
            tracing::debug!(mode = ?self.mode, angle = self.delta().angle(), "Rotate drag ended");
        }
        self.mode = RotateMode::None;
    }

    fn draw(&mut self, view: &ViewportView, draw_manager: &mut dyn DrawManager) {
        if self.gizmo_data.gizmo_matrix == DMat4::ZERO {
            return;
        }
        let center = translation(&self.gizmo_data.gizmo_matrix);
        let Some(frame) = DrawFrame::new(view, center) else {
            return;
        };
        let vp = frame.view_proj * DMat4::from_translation(center) * DMat4::from_scale(DVec3::splat(frame.screen_factor));
        let vp_f = vp.as_mat4();

        self.handles.ensure(draw_manager);
        let hovered = self.handles.mode(draw_manager.current_selection());
        let color = |handle| self.handle_color(handle, hovered);

        let world_axes = if self.orientation == Orientation::Gimbal {
            [0, 1, 2].map(|i| gimbal_axis(&self.gizmo_data, i))
        } else {
            DVec3::AXES.map(|a| self.gizmo_data.gizmo_matrix.transform_vector3(a))
        };
        let axes = world_axes.map(|a| a.normalize_or_zero().as_vec3());

        let view_dir = frame.frustum.view_direction().as_vec3().normalize_or_zero();
        let up = frame.frustum.up_vector().as_vec3().normalize_or_zero();
        let camera_plane = Plane::from_normal_point(view_dir, Vec3::ZERO);
        let right = up.cross(view_dir).normalize_or_zero();

        let xyz = color(RotateMode::XYZ);
        draw_outlined_circle(
            draw_manager,
            vp_f,
            xyz.transparent,
            xyz.color,
            Vec3::ZERO,
            right,
            up,
            1.0,
            0,
            self.handles.id(RotateMode::XYZ),
        );
        if self.orientation != Orientation::Gimbal {
            let view_mvp = (vp * DMat4::from_scale(DVec3::splat(VIEW_RING_SCALE))).as_mat4();
            draw_circle(
                draw_manager,
                view_mvp,
                color(RotateMode::View).color,
                Vec3::ZERO,
                right,
                up,
                1.0,
                0,
                self.handles.id(RotateMode::View),
            );
        }

        for (handle, axis) in [RotateMode::X, RotateMode::Y, RotateMode::Z].into_iter().zip(axes) {
            let ring_right = view_dir.cross(axis).normalize_or_zero();
            let ring_front = ring_right.cross(axis).normalize_or_zero();
            draw_circle_half(
                draw_manager,
                vp_f,
                color(handle).color,
                Vec3::ZERO,
                ring_right,
                ring_front,
                &camera_plane,
                1,
                self.handles.id(handle),
            );
        }

        match self.mode {
            RotateMode::X | RotateMode::Y | RotateMode::Z => {
                if let Some(index) = self.mode.axis_index() {
                    self.draw_pie(draw_manager, vp, 1.0, axes[index]);
                }
            }
            RotateMode::View => self.draw_pie(draw_manager, vp, VIEW_RING_SCALE, -view_dir),
            RotateMode::XYZ | RotateMode::None => {}
        }
    }

    fn is_picked(&self) -> bool {
        self.mode != RotateMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawList, NO_SELECTION, PaintStyle};
    use crate::manipulator::test_support::ortho_view;
    use approx::assert_abs_diff_eq;

    fn drawn_manipulator() -> (RotateManipulator, DrawList) {
        let mut manip = RotateManipulator::new();
        let mut list = DrawList::new();
        manip.draw(&ortho_view(), &mut list);
        list.clear();
        (manip, list)
    }

    /// Quarter turn about +Z on the screen-factor sphere
    fn quarter_turn(manip: &mut RotateManipulator, list: &mut DrawList, mode: RotateMode) {
        let view = ortho_view();
        list.set_current_selection(manip.handle_id(mode));
        manip.on_mouse_press(&MouseEvent::new(120, 100), &view, list);
        manip.on_mouse_move(&MouseEvent::new(100, 80), &view, list);
    }

    #[test]
    fn test_object_rotation_about_z() {
        let (mut manip, mut list) = drawn_manipulator();
        quarter_turn(&mut manip, &mut list, RotateMode::Z);

        assert!(manip.is_picked());
        assert_abs_diff_eq!(manip.delta().angle(), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(manip.delta().axis(), DVec3::Z, epsilon = 1e-9);
        let rotated_x = manip.gizmo_matrix().transform_vector3(DVec3::X);
        assert_abs_diff_eq!(rotated_x, DVec3::Y, epsilon = 1e-6);

        manip.on_mouse_release(&MouseEvent::new(100, 80), &ortho_view(), &list);
        assert_eq!(manip.rotate_mode(), RotateMode::None);
    }

    #[test]
    fn test_view_ring_uses_camera_axis() {
        let (mut manip, mut list) = drawn_manipulator();
        quarter_turn(&mut manip, &mut list, RotateMode::View);
        assert_abs_diff_eq!(manip.delta().angle(), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(manip.delta().axis(), DVec3::Z, epsilon = 1e-9);
    }

    #[test]
    fn test_world_orientation_leaves_gizmo() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_orientation(Orientation::World);
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        assert_abs_diff_eq!(manip.delta().angle(), 90.0, epsilon = 1e-6);
        assert_eq!(*manip.gizmo_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_gizmo_locked_reports_delta_only() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_gizmo_locked(true);
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        assert_abs_diff_eq!(manip.delta().angle(), 90.0, epsilon = 1e-6);
        assert_eq!(*manip.gizmo_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_free_rotation_carries_start_onto_end() {
        let (mut manip, mut list) = drawn_manipulator();
        quarter_turn(&mut manip, &mut list, RotateMode::XYZ);

        let root5 = 5.0_f64.sqrt();
        let start = DVec3::new(2.0, 0.0, root5).normalize();
        let end = DVec3::new(0.0, 2.0, root5).normalize();
        assert_abs_diff_eq!(manip.gizmo_matrix().transform_vector3(start), end, epsilon = 1e-6);
    }

    #[test]
    fn test_gimbal_updates_single_angle() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_orientation(Orientation::Gimbal);
        manip.set_gizmo_data(GizmoData {
            gizmo_angles: DVec3::new(10.0, 0.0, 0.0),
            ..Default::default()
        });
        quarter_turn(&mut manip, &mut list, RotateMode::Z);

        assert_abs_diff_eq!(manip.gizmo_data().gizmo_angles, DVec3::new(10.0, 0.0, 90.0), epsilon = 1e-6);
        assert_eq!(*manip.gizmo_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_gimbal_ignores_free_rotation() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_orientation(Orientation::Gimbal);
        quarter_turn(&mut manip, &mut list, RotateMode::XYZ);

        assert_eq!(manip.rotate_mode(), RotateMode::XYZ);
        assert_eq!(manip.delta(), Rotation::IDENTITY);
        assert_eq!(manip.gizmo_data().gizmo_angles, DVec3::ZERO);
    }

    #[test]
    fn test_gimbal_axis_follows_later_rotations() {
        let data = GizmoData {
            gizmo_angles: DVec3::new(0.0, 0.0, 90.0),
            ..Default::default()
        };
        // XYZ order: Z is applied last, so it carries the X ring
        assert_abs_diff_eq!(gimbal_axis(&data, 0), DVec3::Y, epsilon = 1e-9);
        assert_abs_diff_eq!(gimbal_axis(&data, 2), DVec3::Z, epsilon = 1e-9);

        let data = GizmoData {
            rotation_order: RotationOrder::Zyx,
            ..data
        };
        assert_abs_diff_eq!(gimbal_axis(&data, 0), DVec3::X, epsilon = 1e-9);
    }

    #[test]
    fn test_gimbal_axis_uses_parent_frame() {
        let data = GizmoData {
            parent_gizmo_matrix: DMat4::from_rotation_y(std::f64::consts::FRAC_PI_2) * DMat4::from_scale(DVec3::splat(3.0)),
            ..Default::default()
        };
        assert_abs_diff_eq!(gimbal_axis(&data, 2), DVec3::X, epsilon = 1e-9);
    }

    #[test]
    fn test_step_rounding() {
        let raw = Rotation::new(DVec3::Z, 22.0);
        assert_abs_diff_eq!(snap_to_step(raw, 15.0).angle(), 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snap_to_step(Rotation::new(DVec3::Z, 23.0), 15.0).angle(), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snap_to_step(Rotation::new(DVec3::Z, -23.0), 15.0).angle(), -30.0, epsilon = 1e-12);
        assert_eq!(snap_to_step(raw, 15.0).axis(), DVec3::Z);
    }

    #[test]
    fn test_step_mode_applies_at_read_time() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_step(40.0);
        manip.enable_step_mode(true);
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        assert_abs_diff_eq!(manip.delta().angle(), 80.0, epsilon = 1e-6);

        manip.enable_step_mode(false);
        assert_abs_diff_eq!(manip.delta().angle(), 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_step() {
        let mut manip = RotateManipulator::new();
        assert_eq!(manip.step(), 10.0);
        manip.set_step(-15.0);
        assert_eq!(manip.step(), 15.0);
        manip.set_step(1e-9);
        assert_eq!(manip.step(), 10.0);
    }

    #[test]
    fn test_locked_ignores_press() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_locked(true);
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        assert!(!manip.is_picked());
        assert_eq!(*manip.gizmo_matrix(), DMat4::IDENTITY);
    }

    #[test]
    fn test_set_gizmo_data_resets_delta() {
        let (mut manip, mut list) = drawn_manipulator();
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        manip.set_gizmo_data(GizmoData::default());
        assert_eq!(manip.delta(), Rotation::IDENTITY);
        assert!(manip.is_valid());

        manip.set_gizmo_data(GizmoData {
            gizmo_matrix: DMat4::ZERO,
            ..Default::default()
        });
        assert!(!manip.is_valid());
    }

    #[test]
    fn test_draw_handles() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.draw(&ortho_view(), &mut list);
        assert_eq!(list.drawables_for(manip.handle_id(RotateMode::XYZ)).count(), 2);
        assert_eq!(list.drawables_for(manip.handle_id(RotateMode::View)).count(), 1);
        assert_eq!(list.drawables_for(manip.handle_id(RotateMode::X)).count(), 1);
        assert_eq!(list.drawables_for(NO_SELECTION).count(), 0);

        list.clear();
        manip.set_orientation(Orientation::Gimbal);
        manip.draw(&ortho_view(), &mut list);
        assert_eq!(list.drawables_for(manip.handle_id(RotateMode::View)).count(), 0);
    }

    #[test]
    fn test_half_ring_faces_camera() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.draw(&ortho_view(), &mut list);
        let ring = list.drawables_for(manip.handle_id(RotateMode::X)).next().unwrap();
        assert!(!ring.vertices.is_empty());
        assert!(ring.vertices.iter().all(|v| v.z > 0.0));
    }

    #[test]
    fn test_draw_pie_while_dragging() {
        let (mut manip, mut list) = drawn_manipulator();
        quarter_turn(&mut manip, &mut list, RotateMode::Z);
        list.clear();
        manip.draw(&ortho_view(), &mut list);

        let pie: Vec<_> = list.drawables_for(NO_SELECTION).collect();
        assert_eq!(pie.len(), 3);
        assert_eq!(pie[0].paint_style, PaintStyle::Stippled);
        assert_eq!(pie[0].depth_priority, 2);
        assert_eq!(pie[2].primitive, PrimitiveType::Points);
        assert_eq!(pie[2].vertices.len(), 3);
        assert!(list.drawables_for(manip.handle_id(RotateMode::Z)).all(|d| d.color == colors::SELECT));
    }

    #[test]
    fn test_hover_colors() {
        let (mut manip, mut list) = drawn_manipulator();
        list.set_current_selection(manip.handle_id(RotateMode::XYZ));
        manip.draw(&ortho_view(), &mut list);
        let disc = list.drawables_for(manip.handle_id(RotateMode::XYZ)).next().unwrap();
        assert_eq!(disc.color, colors::ROTATE_XYZ_LOCATE_FILL);

        list.clear();
        list.set_current_selection(manip.handle_id(RotateMode::Y));
        manip.draw(&ortho_view(), &mut list);
        assert!(list.drawables_for(manip.handle_id(RotateMode::Y)).all(|d| d.color == colors::LOCATE));
    }
}
