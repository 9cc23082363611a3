//! Translation gizmo: three axis arrows, three plane quads and a free
//! camera-facing handle.

use glam::{DMat4, DVec3, Mat4, Vec3};
use manip_core::utils::{compute_pick_ray, compute_view_frustum, orthonormalized_rotation};
use manip_core::{IntersectionKind, SharedSnapStrategy, ViewportView};
use serde::{Deserialize, Serialize};

use crate::colors::{self, HandleColor};
use crate::draw::DrawManager;
use crate::draw::shapes::{draw_axis, draw_outlined_circle, draw_outlined_quad};
use crate::manipulator::{DrawFrame, HandleIds, HandleMode, Manipulator, MouseEvent, project_onto, translation};

const AXIS_RADIUS: f32 = 0.05;
const AXIS_LENGTH: f32 = 0.83;
/// Axes closer than this to the view direction are hidden
const AXIS_HIDE_DOT: f64 = 0.99;
/// Planes more edge-on than this are hidden
const PLANE_HIDE_DOT: f64 = 0.2;
const XYZ_HANDLE_SIZE: f64 = 0.1;

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
pub enum MoveMode {
    /// No drag in progress
    #[default]
    None,
    /// Along the gizmo X axis
    X,
    /// Along the gizmo Y axis
    Y,
    /// Along the gizmo Z axis
    Z,
    /// In the gizmo XY plane
    XY,
    /// In the gizmo XZ plane
    XZ,
    /// In the gizmo YZ plane
    YZ,
    /// Free, in the plane facing the camera
    XYZ,
}

impl HandleMode for MoveMode {
    const HANDLES: &'static [Self] = &[
        MoveMode::X,
        MoveMode::Y,
        MoveMode::Z,
        MoveMode::XY,
        MoveMode::XZ,
        MoveMode::YZ,
        MoveMode::XYZ,
    ];
}

impl MoveMode {
    /// Gizmo-space drag direction: the axis, or the plane normal
    fn local_direction(self) -> DVec3 {
        match self {
            MoveMode::X | MoveMode::YZ => DVec3::X,
            MoveMode::Y | MoveMode::XZ => DVec3::Y,
            MoveMode::Z | MoveMode::XY => DVec3::Z,
            MoveMode::None | MoveMode::XYZ => DVec3::ZERO,
        }
    }

    fn is_axis(self) -> bool {
        matches!(self, MoveMode::X | MoveMode::Y | MoveMode::Z)
    }

    fn is_plane(self) -> bool {
        matches!(self, MoveMode::XY | MoveMode::XZ | MoveMode::YZ)
    }

    fn intersection_kind(self) -> IntersectionKind {
        if self.is_axis() { IntersectionKind::Axis } else { IntersectionKind::Plane }
    }

    /// Whether dragging `self` highlights `handle`
    fn drives(self, handle: MoveMode) -> bool {
        let driven: &[MoveMode] = match self {
            MoveMode::None => &[],
            MoveMode::X => &[MoveMode::X],
            MoveMode::Y => &[MoveMode::Y],
            MoveMode::Z => &[MoveMode::Z],
            MoveMode::XY => &[MoveMode::X, MoveMode::Y, MoveMode::XY],
            MoveMode::XZ => &[MoveMode::X, MoveMode::Z, MoveMode::XZ],
            MoveMode::YZ => &[MoveMode::Y, MoveMode::Z, MoveMode::YZ],
            MoveMode::XYZ => &[MoveMode::X, MoveMode::Y, MoveMode::Z, MoveMode::XYZ],
        };
        driven.contains(&handle)
    }

    fn base_color(self) -> HandleColor {
        match self {
            MoveMode::X | MoveMode::YZ => HandleColor::plane(colors::X_AXIS),
            MoveMode::Y | MoveMode::XZ => HandleColor::plane(colors::Y_AXIS),
            MoveMode::Z | MoveMode::XY => HandleColor::plane(colors::Z_AXIS),
            MoveMode::None | MoveMode::XYZ => HandleColor::plane(colors::MOVE_XYZ),
        }
    }
}

/// Translation manipulator.
///
/// The host sets the gizmo matrix, draws, and forwards mouse events. During
/// a drag [`MoveManipulator::delta`] holds the world-space offset from the
/// drag start and the gizmo matrix follows it.
#[derive(Debug, Clone)]
pub struct MoveManipulator {
    gizmo_matrix: DMat4,
    mode: MoveMode,
    locked: bool,
    snap_strategy: Option<SharedSnapStrategy>,
    handles: HandleIds<MoveMode>,
    view_projection: DMat4,
    drag_direction: DVec3,
    drag_plane_translation: DVec3,
    start_drag_point: DVec3,
    intersection: IntersectionKind,
    delta: DVec3,
}

impl Default for MoveManipulator {
    fn default() -> Self {
        Self {
            gizmo_matrix: DMat4::IDENTITY,
            mode: MoveMode::None,
            locked: false,
            snap_strategy: None,
            handles: HandleIds::default(),
            view_projection: DMat4::IDENTITY,
            drag_direction: DVec3::ZERO,
            drag_plane_translation: DVec3::ZERO,
            start_drag_point: DVec3::ZERO,
            intersection: IntersectionKind::Plane,
            delta: DVec3::ZERO,
        }
    }
}

impl MoveManipulator {
    /// Manipulator with an identity gizmo
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gizmo frame
    pub fn gizmo_matrix(&self) -> &DMat4 {
        &self.gizmo_matrix
    }

    /// Replace the gizmo frame, resetting the drag delta
    pub fn set_gizmo_matrix(&mut self, gizmo_matrix: DMat4) {
        self.gizmo_matrix = gizmo_matrix;
        self.delta = DVec3::ZERO;
    }

    /// World-space translation since the drag started
    pub fn delta(&self) -> DVec3 {
        self.delta
    }

    /// Handle being dragged
    pub fn move_mode(&self) -> MoveMode {
        self.mode
    }

    /// Whether interaction is disabled
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Disable or enable interaction; a locked gizmo is drawn grey
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Snap strategy applied to drags, `None` for free movement
    pub fn snap_strategy(&self) -> Option<&SharedSnapStrategy> {
        self.snap_strategy.as_ref()
    }

    /// Set or clear the snap strategy
    pub fn set_snap_strategy(&mut self, snap_strategy: Option<SharedSnapStrategy>) {
        self.snap_strategy = snap_strategy;
    }

    /// Whether a gizmo frame has been set
    pub fn is_valid(&self) -> bool {
        self.gizmo_matrix != DMat4::ZERO
    }

    /// Selection id of a handle, zero before the first draw
    pub fn handle_id(&self, mode: MoveMode) -> u32 {
        self.handles.id(mode)
    }

    fn intersect(&self, view: &ViewportView, event: &MouseEvent) -> Option<DVec3> {
        self.intersection.intersect(
            view,
            self.drag_plane_translation,
            self.drag_direction,
            &self.view_projection,
            event.x,
            event.y,
        )
    }

    fn handle_color(&self, handle: MoveMode, hovered: Option<MoveMode>) -> HandleColor {
        if self.locked {
            return HandleColor::LOCKED;
        }
        if self.mode == MoveMode::None && hovered == Some(handle) {
            return HandleColor::LOCATED;
        }
        if self.mode.drives(handle) {
            return match handle {
                MoveMode::XYZ => HandleColor::new(colors::SELECT, colors::SELECT_TRANSPARENT),
                _ => HandleColor::SELECTED,
            };
        }
        handle.base_color()
    }
}

impl Manipulator for MoveManipulator {
    fn on_mouse_press(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) {
        if !view.is_valid() {
            tracing::warn!("Ignoring move press on an invalid viewport");
            return;
        }
        if self.locked {
            return;
        }

        self.mode = MoveMode::None;
        let Some(mode) = self.handles.mode(draw_manager.current_selection()) else {
            return;
        };
        self.mode = mode;

        self.drag_direction = match mode {
            MoveMode::XYZ => compute_pick_ray(view, event.x, event.y).direction,
            _ => (orthonormalized_rotation(&self.gizmo_matrix) * mode.local_direction()).normalize_or_zero(),
        };
        self.drag_plane_translation = translation(&self.gizmo_matrix);
        self.intersection = mode.intersection_kind();
        self.view_projection = compute_view_frustum(view).view_projection();

        match self.intersect(view, event) {
            Some(point) => self.start_drag_point = point,
            None => tracing::debug!(?mode, "Move drag started without a valid intersection"),
        }
        tracing::debug!(?mode, start = ?self.start_drag_point, "Move drag started");
    }

    fn on_mouse_move(&mut self, event: &MouseEvent, view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode == MoveMode::None || self.locked || !view.is_valid() {
            return;
        }
        let Some(point) = self.intersect(view, event) else {
            return;
        };

        let start = self.drag_plane_translation;
        self.delta = match &self.snap_strategy {
            Some(snap) => {
                let snapped = snap.get_snap_point(start, self.start_drag_point, point);
                if self.mode.is_axis() {
                    project_onto(snapped - start, self.drag_direction)
                } else if self.mode.is_plane() {
                    snapped + project_onto(start - snapped, self.drag_direction) - start
                } else {
                    snapped - start
                }
            }
            None => point - self.start_drag_point,
        };
        self.gizmo_matrix.w_axis = (start + self.delta).extend(1.0);
        tracing::trace!(delta = ?self.delta, "Move drag updated");
    }

    fn on_mouse_release(&mut self, _event: &MouseEvent, _view: &ViewportView, _draw_manager: &dyn DrawManager) {
        if self.mode != MoveMode::None {
            tracing::debug!(mode = ?self.mode, delta = ?self.delta, "Move drag ended");
        }
        self.mode = MoveMode::None;
        self.delta = DVec3::ZERO;
    }

    fn draw(&mut self, view: &ViewportView, draw_manager: &mut dyn DrawManager) {
        if !self.is_valid() {
            return;
        }
        let center = translation(&self.gizmo_matrix);
        let Some(frame) = DrawFrame::new(view, center) else {
            return;
        };
        self.view_projection = frame.view_proj;

        let sf = frame.screen_factor;
        let model = self.gizmo_matrix * DMat4::from_scale(DVec3::splat(sf));
        let mvp = (frame.view_proj * model).as_mat4();
        let model_f = model.as_mat4();

        self.handles.ensure(draw_manager);
        let hovered = self.handles.mode(draw_manager.current_selection());
        let color = |handle| self.handle_color(handle, hovered);

        let view_dir = self
            .gizmo_matrix
            .inverse()
            .transform_point3(frame.frustum.position)
            .normalize_or_zero();

        let axes = [
            (MoveMode::X, Vec3::X, Vec3::Y, Vec3::Z),
            (MoveMode::Y, Vec3::Y, Vec3::Z, Vec3::X),
            (MoveMode::Z, Vec3::Z, Vec3::X, Vec3::Y),
        ];
        for (handle, axis, vtx, vty) in axes {
            if view_dir.dot(axis.as_dvec3()).abs() < AXIS_HIDE_DOT {
                draw_axis(
                    draw_manager,
                    mvp,
                    model_f,
                    color(handle).color,
                    Vec3::ZERO,
                    axis,
                    vtx,
                    vty,
                    AXIS_RADIUS,
                    AXIS_LENGTH,
                    self.handles.id(handle),
                );
            }
        }

        let xyz = color(MoveMode::XYZ);
        let half_size = (XYZ_HANDLE_SIZE * sf) as f32;
        if self.snap_strategy.is_none() {
            // Billboard in view space around the gizmo center
            let billboard = frame.frustum.projection_matrix() * DMat4::from_translation(frame.view.transform_point3(center));
            let quad = [
                Vec3::new(-half_size, -half_size, 0.0),
                Vec3::new(half_size, -half_size, 0.0),
                Vec3::new(half_size, half_size, 0.0),
                Vec3::new(-half_size, half_size, 0.0),
            ];
            draw_outlined_quad(
                draw_manager,
                billboard.as_mat4(),
                xyz.transparent,
                xyz.color,
                &quad,
                1.0,
                1,
                self.handles.id(MoveMode::XYZ),
            );
        } else {
            let circle_mvp: Mat4 = (frame.view_proj
                * DMat4::from_translation(center)
                * DMat4::from_scale(DVec3::splat(XYZ_HANDLE_SIZE * sf)))
            .as_mat4();
            let up = frame.frustum.up_vector().as_vec3().normalize_or_zero();
            let right = up.cross(frame.frustum.view_direction().as_vec3()).normalize_or_zero();
            draw_outlined_circle(
                draw_manager,
                circle_mvp,
                xyz.transparent,
                xyz.color,
                Vec3::ZERO,
                right,
                up,
                1.0,
                1,
                self.handles.id(MoveMode::XYZ),
            );
        }

        let planes = [
            (MoveMode::XY, DVec3::Z, &XY_QUAD),
            (MoveMode::XZ, DVec3::Y, &XZ_QUAD),
            (MoveMode::YZ, DVec3::X, &YZ_QUAD),
        ];
        for (handle, normal, quad) in planes {
            if view_dir.dot(normal).abs() > PLANE_HIDE_DOT {
                let c = color(handle);
                draw_outlined_quad(draw_manager, mvp, c.transparent, c.color, quad, 1.0, 1, self.handles.id(handle));
            }
        }
    }

    fn is_picked(&self) -> bool {
        self.mode != MoveMode::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;
    use crate::manipulator::test_support::ortho_view;
    use approx::assert_abs_diff_eq;
    use manip_core::{AbsoluteSnapStrategy, RelativeSnapStrategy};
    use std::sync::Arc;

    fn drawn_manipulator() -> (MoveManipulator, DrawList) {
        let mut manip = MoveManipulator::new();
        let mut list = DrawList::new();
        manip.draw(&ortho_view(), &mut list);
        list.clear();
        (manip, list)
    }

    fn drag(manip: &mut MoveManipulator, list: &mut DrawList, mode: MoveMode, from: (i32, i32), to: (i32, i32)) {
        let view = ortho_view();
        list.set_current_selection(manip.handle_id(mode));
        manip.on_mouse_press(&MouseEvent::new(from.0, from.1), &view, list);
        manip.on_mouse_move(&MouseEvent::new(to.0, to.1), &view, list);
    }

    #[test]
    fn test_press_before_draw_is_ignored() {
        let mut manip = MoveManipulator::new();
        let mut list = DrawList::new();
        list.set_current_selection(1);
        manip.on_mouse_press(&MouseEvent::new(100, 100), &ortho_view(), &list);
        assert!(!manip.is_picked());
    }

    #[test]
    fn test_handle_ids_are_unique() {
        let (manip, _) = drawn_manipulator();
        let mut ids: Vec<u32> = MoveMode::HANDLES.iter().map(|m| manip.handle_id(*m)).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn test_drag_along_y() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::Y, (100, 100), (100, 50));

        assert!(manip.is_picked());
        assert_abs_diff_eq!(manip.delta(), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(translation(manip.gizmo_matrix()), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);

        manip.on_mouse_release(&MouseEvent::new(100, 50), &ortho_view(), &list);
        assert!(!manip.is_picked());
        assert_eq!(manip.delta(), DVec3::ZERO);
        assert_abs_diff_eq!(translation(manip.gizmo_matrix()), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_axis_drag_ignores_perpendicular_motion() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::X, (100, 100), (130, 60));
        assert_abs_diff_eq!(manip.delta(), DVec3::new(3.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_drag_follows_rotated_gizmo() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_gizmo_matrix(DMat4::from_rotation_z(std::f64::consts::FRAC_PI_2));
        // Gizmo X now points along world Y
        drag(&mut manip, &mut list, MoveMode::X, (100, 100), (130, 80));
        assert_abs_diff_eq!(manip.delta(), DVec3::new(0.0, 2.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_plane_drag() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::XY, (100, 100), (120, 80));
        assert_abs_diff_eq!(manip.delta(), DVec3::new(2.0, 2.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_free_drag_in_camera_plane() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::XYZ, (100, 100), (110, 120));
        assert_abs_diff_eq!(manip.delta(), DVec3::new(1.0, -2.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_relative_snap_on_axis() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_snap_strategy(Some(Arc::new(RelativeSnapStrategy::new(1.0))));
        drag(&mut manip, &mut list, MoveMode::X, (100, 100), (124, 100));
        assert_abs_diff_eq!(manip.delta(), DVec3::new(2.0, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_absolute_snap_on_plane() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_gizmo_matrix(DMat4::from_translation(DVec3::new(0.3, 0.0, 0.0)));
        manip.set_snap_strategy(Some(Arc::new(AbsoluteSnapStrategy::new(1.0))));
        // Raw hit (2.7, 2.6, 0) snaps to (3, 3, 0)
        drag(&mut manip, &mut list, MoveMode::XY, (103, 100), (127, 74));
        assert_abs_diff_eq!(translation(manip.gizmo_matrix()), DVec3::new(3.0, 3.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(manip.delta(), DVec3::new(2.7, 3.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_axis_parallel_to_view_does_not_move() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::Z, (100, 100), (150, 150));
        assert!(manip.is_picked());
        assert_eq!(manip.delta(), DVec3::ZERO);
        assert_eq!(translation(manip.gizmo_matrix()), DVec3::ZERO);
    }

    #[test]
    fn test_locked_ignores_press() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_locked(true);
        drag(&mut manip, &mut list, MoveMode::X, (100, 100), (130, 100));
        assert!(!manip.is_picked());
        assert_eq!(manip.delta(), DVec3::ZERO);
    }

    #[test]
    fn test_set_gizmo_matrix_resets_delta() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::X, (100, 100), (130, 100));
        manip.set_gizmo_matrix(DMat4::IDENTITY);
        assert_eq!(manip.delta(), DVec3::ZERO);
        assert!(manip.is_valid());

        manip.set_gizmo_matrix(DMat4::ZERO);
        assert!(!manip.is_valid());
    }

    #[test]
    fn test_draw_hides_handles_facing_camera() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.draw(&ortho_view(), &mut list);

        assert_eq!(list.drawables_for(manip.handle_id(MoveMode::X)).count(), 2);
        assert_eq!(list.drawables_for(manip.handle_id(MoveMode::Z)).count(), 0);
        assert_eq!(list.drawables_for(manip.handle_id(MoveMode::XY)).count(), 2);
        assert_eq!(list.drawables_for(manip.handle_id(MoveMode::XZ)).count(), 0);
        assert_eq!(list.drawables_for(manip.handle_id(MoveMode::XYZ)).count(), 2);
    }

    #[test]
    fn test_draw_colors() {
        let (mut manip, mut list) = drawn_manipulator();
        list.set_current_selection(manip.handle_id(MoveMode::X));
        manip.draw(&ortho_view(), &mut list);
        assert!(list.drawables_for(manip.handle_id(MoveMode::X)).all(|d| d.color == colors::LOCATE));
        assert!(list.drawables_for(manip.handle_id(MoveMode::Y)).all(|d| d.color == colors::Y_AXIS));

        list.clear();
        manip.set_locked(true);
        manip.draw(&ortho_view(), &mut list);
        assert!(list.drawables().iter().all(|d| d.color == colors::LOCK || d.color == colors::LOCK_TRANSPARENT));
    }

    #[test]
    fn test_drag_highlights_driven_axes() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::XY, (100, 100), (120, 80));
        list.clear();
        manip.draw(&ortho_view(), &mut list);
        assert!(list.drawables_for(manip.handle_id(MoveMode::X)).all(|d| d.color == colors::SELECT));
        assert!(list.drawables_for(manip.handle_id(MoveMode::XY)).all(|d| d.color == colors::SELECT));
    }

    #[test]
    fn test_draw_skipped_at_camera_position() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_gizmo_matrix(DMat4::from_translation(DVec3::new(0.0, 0.0, 10.0)));
        manip.draw(&ortho_view(), &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_snap_draws_circle_handle() {
        let (mut manip, mut list) = drawn_manipulator();
        manip.set_snap_strategy(Some(Arc::new(RelativeSnapStrategy::new(1.0))));
        manip.draw(&ortho_view(), &mut list);
        let xyz: Vec<_> = list.drawables_for(manip.handle_id(MoveMode::XYZ)).collect();
        assert_eq!(xyz.len(), 2);
        assert_eq!(xyz[0].vertices.len(), 52);
    }

    #[test]
    fn test_lock_during_drag_freezes_delta() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::Y, (100, 100), (100, 50));
        manip.set_locked(true);

        manip.on_mouse_move(&MouseEvent::new(100, 30), &ortho_view(), &list);
        assert!(manip.is_picked());
        assert_abs_diff_eq!(manip.delta(), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);

        manip.on_mouse_release(&MouseEvent::new(100, 30), &ortho_view(), &list);
        assert!(!manip.is_picked());
        assert_abs_diff_eq!(translation(manip.gizmo_matrix()), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn test_release_without_drag_is_idempotent() {
        let (mut manip, list) = drawn_manipulator();
        manip.set_gizmo_matrix(DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        for _ in 0..2 {
            manip.on_mouse_release(&MouseEvent::new(100, 100), &ortho_view(), &list);
            assert_eq!(manip.move_mode(), MoveMode::None);
            assert_eq!(manip.delta(), DVec3::ZERO);
            assert_eq!(*manip.gizmo_matrix(), DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        }
    }

    #[test]
    fn test_move_on_invalid_view_keeps_delta() {
        let (mut manip, mut list) = drawn_manipulator();
        drag(&mut manip, &mut list, MoveMode::Y, (100, 100), (100, 50));

        let mut collapsed = ortho_view();
        collapsed.dimensions.width = 0;
        manip.on_mouse_move(&MouseEvent::new(100, 30), &collapsed, &list);
        assert!(manip.is_picked());
        assert_abs_diff_eq!(manip.delta(), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(translation(manip.gizmo_matrix()), DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);
    }
}
