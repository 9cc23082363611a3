//! Pick ray queries

use glam::DVec3;

/// Half-line used for viewport picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Normalized direction
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn point(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Ray parameter of the hit with the plane through `point` with `normal`.
    ///
    /// Returns `None` when the ray is parallel to the plane or the plane
    /// lies behind the origin.
    pub fn intersect_plane(&self, point: DVec3, normal: DVec3) -> Option<f64> {
        let denom = self.direction.dot(normal);
        if denom.abs() < f64::EPSILON {
            return None;
        }
        let t = (point - self.origin).dot(normal) / denom;
        (t >= 0.0).then_some(t)
    }

    /// Ray parameter of the first hit with a sphere.
    ///
    /// When the origin is inside the sphere the exit hit is returned.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let a = self.direction.dot(self.direction);
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let enter = (-b - sqrt_d) / (2.0 * a);
        let exit = (-b + sqrt_d) / (2.0 * a);
        if enter >= 0.0 {
            Some(enter)
        } else if exit >= 0.0 {
            Some(exit)
        } else {
            None
        }
    }

    /// Point on the infinite line closest to this ray.
    ///
    /// The ray parameter is clamped to be non-negative, so lines passing
    /// behind the origin resolve to the projection of the origin. Returns
    /// `None` for parallel lines.
    pub fn closest_point_on_line(&self, line_origin: DVec3, line_dir: DVec3) -> Option<DVec3> {
        let d2 = line_dir.normalize_or_zero();
        if d2 == DVec3::ZERO {
            return None;
        }
        let d1 = self.direction;
        let r = self.origin - line_origin;

        let b = d1.dot(d2);
        let c = d1.dot(r);
        let f = d2.dot(r);
        let denom = d1.dot(d1) - b * b;
        if denom.abs() < f64::EPSILON {
            return None;
        }

        let ray_t = (b * f - c) / denom;
        let line_t = if ray_t < 0.0 {
            f
        } else {
            (f * d1.dot(d1) - b * c) / denom
        };
        Some(line_origin + d2 * line_t)
    }
}
