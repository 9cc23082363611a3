//! Geometry utilities shared by the viewport manipulators
//!
//! Every function here is pure: it reads the per-frame [`ViewportView`]
//! and returns a value. Intersection helpers return `None` for degenerate
//! configurations (ray parallel to the axis or plane, hit point outside
//! the clip depth range); callers skip the update for that event.

use glam::{DMat4, DVec2, DVec3};

use crate::camera::{ConformPolicy, Frustum, Projection};
use crate::constants::{
    AXIS_PARALLEL_THRESHOLD, PLANE_PARALLEL_THRESHOLD, REFERENCE_FOV_DEGREES, SCREEN_FACTOR_SCALE,
};
use crate::ray::Ray;
use crate::rotation::RotationOrder;
use crate::viewport::{ViewportDimensions, ViewportView};

pub use crate::rotation::{decompose_to_euler, orthonormalized_rotation, remove_scale_shear, to_quaternion};

/// Intersection routine used to track the mouse during a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    /// Closest point on the line through the origin along the direction
    Axis,
    /// Hit with the plane through the origin, direction being its normal
    Plane,
    /// Raw normalized device coordinates of the mouse
    ScreenSpace,
}

impl IntersectionKind {
    pub fn intersect(
        self,
        view: &ViewportView,
        origin: DVec3,
        direction: DVec3,
        view_proj: &DMat4,
        x: i32,
        y: i32,
    ) -> Option<DVec3> {
        match self {
            IntersectionKind::Axis => compute_axis_intersection(view, origin, direction, view_proj, x, y),
            IntersectionKind::Plane => compute_plane_intersection(view, origin, direction, view_proj, x, y),
            IntersectionKind::ScreenSpace => compute_screen_space_pos(view, origin, direction, view_proj, x, y),
        }
    }
}

/// Application order of the basis vectors for a rotation order
pub fn get_basis_indices_from_rot_order(rotation_order: RotationOrder) -> [usize; 3] {
    rotation_order.basis_indices()
}

/// Camera frustum with its window fitted to the viewport aspect ratio
pub fn compute_view_frustum(view: &ViewportView) -> Frustum {
    let mut frustum = view.frustum;
    frustum.conform_window(view.dimensions.aspect_ratio(), ConformPolicy::Fit);
    frustum
}

/// Pixel coordinates to normalized device coordinates (Y up)
pub fn compute_pick_point(dim: &ViewportDimensions, x: i32, y: i32) -> DVec2 {
    DVec2::new(
        2.0 * x as f64 / dim.width as f64 - 1.0,
        1.0 - 2.0 * y as f64 / dim.height as f64,
    )
}

/// World-space pick ray through a pixel of the viewport
pub fn compute_pick_ray(view: &ViewportView, x: i32, y: i32) -> Ray {
    compute_pick_ray_with_frustum(&compute_view_frustum(view), &view.dimensions, x, y)
}

/// Pick ray through a pixel using an already conformed frustum
pub fn compute_pick_ray_with_frustum(frustum: &Frustum, dim: &ViewportDimensions, x: i32, y: i32) -> Ray {
    frustum.compute_pick_ray(compute_pick_point(dim, x, y))
}

/// Scale keeping a gizmo at `center` the same size on screen.
pub fn compute_screen_factor(view: &ViewportView, center: DVec3) -> f64 {
    let conformed = compute_view_frustum(view);
    let clip = conformed.projection_matrix() * view.frustum.view_matrix() * center.extend(1.0);
    let screen_factor = view.global_scale * SCREEN_FACTOR_SCALE * clip.w;

    match view.frustum.projection {
        Projection::Perspective => screen_factor * view.frustum.fov_degrees() / REFERENCE_FOV_DEGREES,
        Projection::Orthographic => screen_factor * view.frustum.window.width(),
    }
}

fn within_clip_depth(view_proj: &DMat4, point: DVec3) -> bool {
    let depth = view_proj.project_point3(point).z;
    (-1.0..=1.0).contains(&depth)
}

/// Point on the line through `origin` along `direction` closest to the pick ray
pub fn compute_axis_intersection(
    view: &ViewportView,
    origin: DVec3,
    direction: DVec3,
    view_proj: &DMat4,
    x: i32,
    y: i32,
) -> Option<DVec3> {
    let pick_ray = compute_pick_ray(view, x, y);
    if direction.dot(pick_ray.direction).abs() > AXIS_PARALLEL_THRESHOLD {
        return None;
    }

    let line_point = pick_ray.closest_point_on_line(origin, direction)?;
    within_clip_depth(view_proj, line_point).then_some(line_point)
}

/// Pick ray hit with the plane through `origin` with `normal`
pub fn compute_plane_intersection(
    view: &ViewportView,
    origin: DVec3,
    normal: DVec3,
    view_proj: &DMat4,
    x: i32,
    y: i32,
) -> Option<DVec3> {
    let pick_ray = compute_pick_ray(view, x, y);
    if normal.dot(pick_ray.direction).abs() < PLANE_PARALLEL_THRESHOLD {
        return None;
    }

    let t = pick_ray.intersect_plane(origin, normal)?;
    let point = pick_ray.point(t);
    within_clip_depth(view_proj, point).then_some(point)
}

/// Pick ray hit with the sphere of radius `screen_factor` around `center`.
///
/// A miss falls back to the camera-facing plane through `center`, so a
/// point is always produced.
pub fn compute_sphere_intersection(view: &ViewportView, screen_factor: f64, center: DVec3, x: i32, y: i32) -> DVec3 {
    let frustum = compute_view_frustum(view);
    let pick_ray = compute_pick_ray_with_frustum(&frustum, &view.dimensions, x, y);

    if let Some(t) = pick_ray.intersect_sphere(center, screen_factor) {
        return pick_ray.point(t);
    }
    if let Some(t) = pick_ray.intersect_plane(center, frustum.view_direction()) {
        return pick_ray.point(t);
    }
    // Center behind the camera
    pick_ray.point(pick_ray.direction.dot(center - pick_ray.origin).max(0.0))
}

/// Mouse position in normalized device coordinates with zero depth.
///
/// Shares the signature of the other intersection helpers so it can be
/// dispatched through [`IntersectionKind`]; the geometry arguments are
/// ignored.
pub fn compute_screen_space_pos(
    view: &ViewportView,
    _origin: DVec3,
    _direction: DVec3,
    _view_proj: &DMat4,
    x: i32,
    y: i32,
) -> Option<DVec3> {
    Some(compute_pick_point(&view.dimensions, x, y).extend(0.0))
}
