//! Camera frustum for viewport picking
//!
//! The camera looks down its local `-Z` axis with `+Y` up. The window is the
//! visible rectangle on the reference plane at distance 1 for perspective
//! cameras, or in view units for orthographic ones.

use glam::{DMat3, DMat4, DQuat, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// Camera projection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// How a frustum window is adapted to a target aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConformPolicy {
    /// Grow the shorter side so the whole original window stays visible
    #[default]
    Fit,
    /// Shrink the longer side
    Crop,
    /// Keep the height, adjust the width
    MatchVertically,
    /// Keep the width, adjust the height
    MatchHorizontally,
}

/// Frustum window rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub min: DVec2,
    pub max: DVec2,
}

impl Window {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Window centered on the origin with the given half extents
    pub fn symmetric(half_width: f64, half_height: f64) -> Self {
        Self {
            min: DVec2::new(-half_width, -half_height),
            max: DVec2::new(half_width, half_height),
        }
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Camera view volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    /// Eye position in world space
    pub position: DVec3,
    /// Camera orientation (local `-Z` is the view direction)
    pub rotation: DQuat,
    pub window: Window,
    pub near: f64,
    pub far: f64,
    pub projection: Projection,
}

impl Default for Frustum {
    fn default() -> Self {
        Self::perspective(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::Y, 45.0, 1.0, 0.1, 1000.0)
    }
}

impl Frustum {
    /// Create a perspective frustum looking from `position` at `target`
    pub fn perspective(
        position: DVec3,
        target: DVec3,
        up: DVec3,
        fov_y_degrees: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let half_height = (fov_y_degrees.to_radians() * 0.5).tan();
        Self {
            position,
            rotation: look_rotation(target - position, up),
            window: Window::symmetric(half_height * aspect, half_height),
            near,
            far,
            projection: Projection::Perspective,
        }
    }

    /// Create an orthographic frustum showing `height` view units vertically
    pub fn orthographic(
        position: DVec3,
        target: DVec3,
        up: DVec3,
        height: f64,
        aspect: f64,
        near: f64,
        far: f64,
    ) -> Self {
        let half_height = height * 0.5;
        Self {
            position,
            rotation: look_rotation(target - position, up),
            window: Window::symmetric(half_height * aspect, half_height),
            near,
            far,
            projection: Projection::Orthographic,
        }
    }

    /// Normalized world-space view direction
    pub fn view_direction(&self) -> DVec3 {
        (self.rotation * DVec3::NEG_Z).normalize()
    }

    /// Normalized world-space up vector
    pub fn up_vector(&self) -> DVec3 {
        (self.rotation * DVec3::Y).normalize()
    }

    /// Horizontal field of view in degrees (zero for orthographic cameras)
    pub fn fov_degrees(&self) -> f64 {
        match self.projection {
            Projection::Perspective => 2.0 * (self.window.width() * 0.5).atan().to_degrees(),
            Projection::Orthographic => 0.0,
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    /// Camera-to-clip transform with OpenGL depth range [-1, 1]
    pub fn projection_matrix(&self) -> DMat4 {
        let Window { min, max } = self.window;
        let (near, far) = (self.near, self.far);
        match self.projection {
            Projection::Perspective => {
                let width = max.x - min.x;
                let height = max.y - min.y;
                DMat4::from_cols(
                    DVec4::new(2.0 / width, 0.0, 0.0, 0.0),
                    DVec4::new(0.0, 2.0 / height, 0.0, 0.0),
                    DVec4::new(
                        (max.x + min.x) / width,
                        (max.y + min.y) / height,
                        -(far + near) / (far - near),
                        -1.0,
                    ),
                    DVec4::new(0.0, 0.0, -2.0 * far * near / (far - near), 0.0),
                )
            }
            Projection::Orthographic => {
                DMat4::orthographic_rh_gl(min.x, max.x, min.y, max.y, near, far)
            }
        }
    }

    /// World-to-clip transform
    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Adapt the window to the given width/height ratio
    pub fn conform_window(&mut self, aspect: f64, policy: ConformPolicy) {
        if aspect <= 0.0 || !aspect.is_finite() {
            return;
        }
        let size = self.window.size();
        if size.y <= 0.0 || size.x <= 0.0 {
            return;
        }

        let window_aspect = size.x / size.y;
        let policy = match policy {
            ConformPolicy::Fit if window_aspect > aspect => ConformPolicy::MatchHorizontally,
            ConformPolicy::Fit => ConformPolicy::MatchVertically,
            ConformPolicy::Crop if window_aspect > aspect => ConformPolicy::MatchVertically,
            ConformPolicy::Crop => ConformPolicy::MatchHorizontally,
            other => other,
        };

        let center = self.window.center();
        let half = match policy {
            ConformPolicy::MatchHorizontally => DVec2::new(size.x, size.x / aspect) * 0.5,
            _ => DVec2::new(size.y * aspect, size.y) * 0.5,
        };
        self.window = Window::new(center - half, center + half);
    }

    /// World-space ray through a point given in normalized device coordinates
    pub fn compute_pick_ray(&self, ndc: DVec2) -> Ray {
        let t = (ndc + DVec2::ONE) * 0.5;
        let on_window = self.window.min + t * self.window.size();
        match self.projection {
            Projection::Perspective => {
                let local_dir = DVec3::new(on_window.x, on_window.y, -1.0);
                Ray::new(self.position, self.rotation * local_dir)
            }
            Projection::Orthographic => {
                let local_origin = DVec3::new(on_window.x, on_window.y, 0.0);
                Ray::new(
                    self.position + self.rotation * local_origin,
                    self.rotation * DVec3::NEG_Z,
                )
            }
        }
    }
}

/// Orientation whose local `-Z` points along `forward` and `+Y` towards `up`
fn look_rotation(forward: DVec3, up: DVec3) -> DQuat {
    let forward = forward.normalize_or_zero();
    if forward == DVec3::ZERO {
        return DQuat::IDENTITY;
    }
    let mut right = forward.cross(up).normalize_or_zero();
    if right == DVec3::ZERO {
        // Looking straight along `up`, pick any perpendicular
        right = forward.any_orthonormal_vector();
    }
    let true_up = right.cross(forward);
    DQuat::from_mat3(&DMat3::from_cols(right, true_up, -forward)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_look_rotation_basis() {
        let frustum = Frustum::perspective(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            60.0,
            1.0,
            0.1,
            100.0,
        );
        assert_abs_diff_eq!(frustum.view_direction(), DVec3::NEG_Z, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.up_vector(), DVec3::Y, epsilon = 1e-12);
    }

    #[test]
    fn test_center_pick_ray_follows_view_direction() {
        let frustum = Frustum::perspective(
            DVec3::new(3.0, 4.0, 5.0),
            DVec3::ZERO,
            DVec3::Z,
            40.0,
            1.5,
            0.1,
            100.0,
        );
        let ray = frustum.compute_pick_ray(DVec2::ZERO);
        assert_abs_diff_eq!(ray.origin, frustum.position, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.direction, frustum.view_direction(), epsilon = 1e-9);
    }

    #[test]
    fn test_orthographic_pick_ray_is_parallel() {
        let frustum = Frustum::orthographic(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            20.0,
            1.0,
            0.1,
            100.0,
        );
        let ray = frustum.compute_pick_ray(DVec2::new(0.5, -1.0));
        assert_abs_diff_eq!(ray.direction, DVec3::NEG_Z, epsilon = 1e-12);
        assert_abs_diff_eq!(ray.origin, DVec3::new(5.0, -10.0, 10.0), epsilon = 1e-9);
    }

    #[test]
    fn test_fit_grows_short_side() {
        let mut frustum = Frustum::orthographic(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            2.0,
            1.0,
            0.1,
            100.0,
        );
        frustum.conform_window(2.0, ConformPolicy::Fit);
        assert_abs_diff_eq!(frustum.window.width(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.window.height(), 2.0, epsilon = 1e-12);

        frustum.conform_window(0.5, ConformPolicy::Fit);
        assert_abs_diff_eq!(frustum.window.width(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.window.height(), 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_crop_shrinks_long_side() {
        let mut frustum = Frustum::default();
        frustum.window = Window::symmetric(2.0, 1.0);
        frustum.conform_window(1.0, ConformPolicy::Crop);
        assert_abs_diff_eq!(frustum.window.width(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(frustum.window.height(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_depth_range() {
        let frustum = Frustum::perspective(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            45.0,
            1.0,
            1.0,
            100.0,
        );
        let view_proj = frustum.view_projection();
        let near = view_proj.project_point3(DVec3::new(0.0, 0.0, 9.0));
        let far = view_proj.project_point3(DVec3::new(0.0, 0.0, -90.0));
        assert_abs_diff_eq!(near.z, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(far.z, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_fov() {
        let frustum = Frustum::perspective(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::ZERO,
            DVec3::Y,
            90.0,
            1.0,
            0.1,
            100.0,
        );
        assert_abs_diff_eq!(frustum.fov_degrees(), 90.0, epsilon = 1e-9);
    }
}
