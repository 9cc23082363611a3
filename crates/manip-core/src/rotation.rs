//! Axis/angle rotations, rotation orders and Euler angles
//!
//! Angles are in degrees. Euler angle triples are stored per axis
//! (`[x, y, z]`) regardless of the order in which they are applied.

use std::f64::consts::{PI, TAU};

use glam::{DMat3, DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::EULER_ZERO_EPSILON;

/// `|sin|` of the middle angle above which the decomposition is gimbal locked
const GIMBAL_LOCK_THRESHOLD: f64 = 1.0 - 1e-9;

/// Order in which the three elemental rotations are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RotationOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::Xyz,
        RotationOrder::Xzy,
        RotationOrder::Yxz,
        RotationOrder::Yzx,
        RotationOrder::Zxy,
        RotationOrder::Zyx,
    ];

    /// Convert a raw order index as stored by hosts.
    ///
    /// Unknown values are a coding error on the caller's side; they are
    /// reported and replaced with [`RotationOrder::Xyz`].
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => RotationOrder::Xyz,
            1 => RotationOrder::Xzy,
            2 => RotationOrder::Yxz,
            3 => RotationOrder::Yzx,
            4 => RotationOrder::Zxy,
            5 => RotationOrder::Zyx,
            _ => {
                tracing::error!(
                    index,
                    "Failed to get basis vector indices. Rotate manipulation might be incorrect."
                );
                RotationOrder::Xyz
            }
        }
    }

    /// Basis vector indices in application order (first applied first)
    pub fn basis_indices(self) -> [usize; 3] {
        match self {
            RotationOrder::Xyz => [0, 1, 2],
            RotationOrder::Xzy => [0, 2, 1],
            RotationOrder::Yxz => [1, 0, 2],
            RotationOrder::Yzx => [1, 2, 0],
            RotationOrder::Zxy => [2, 0, 1],
            RotationOrder::Zyx => [2, 1, 0],
        }
    }
}

/// Rotation by a signed angle (degrees) about a unit axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    axis: DVec3,
    angle: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        axis: DVec3::X,
        angle: 0.0,
    };

    /// Rotation about `axis` (normalized here); a zero axis yields identity
    pub fn new(axis: DVec3, angle_degrees: f64) -> Self {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return Self::IDENTITY;
        }
        Self {
            axis,
            angle: angle_degrees,
        }
    }

    pub fn axis(&self) -> DVec3 {
        self.axis
    }

    /// Signed angle in degrees
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Shortest rotation carrying direction `from` onto direction `to`
    pub fn between(from: DVec3, to: DVec3) -> Self {
        let from = from.normalize_or_zero();
        let to = to.normalize_or_zero();
        if from == DVec3::ZERO || to == DVec3::ZERO {
            return Self::IDENTITY;
        }

        let cross = from.cross(to);
        let cos = from.dot(to);
        if cross.length_squared() < 1e-20 {
            return if cos > 0.0 {
                Self::IDENTITY
            } else {
                Self::new(from.any_orthonormal_vector(), 180.0)
            };
        }
        Self::new(cross, cross.length().atan2(cos).to_degrees())
    }

    /// Rotation about `axis` that best carries `from` toward `to`.
    ///
    /// Both vectors are projected onto the plane perpendicular to `axis`
    /// before measuring the signed angle between them. A degenerate
    /// projection yields a zero angle.
    pub fn rotate_onto_projected(from: DVec3, to: DVec3, axis: DVec3) -> Self {
        let axis = axis.normalize_or_zero();
        let from_proj = (from - axis * from.dot(axis)).normalize_or_zero();
        let to_proj = (to - axis * to.dot(axis)).normalize_or_zero();

        let sin = from_proj.cross(to_proj).dot(axis);
        let cos = from_proj.dot(to_proj);
        let angle = if sin.abs() < 1e-6 && cos.abs() < 1e-6 {
            0.0
        } else {
            sin.atan2(cos).to_degrees()
        };
        Self::new(axis, angle)
    }

    pub fn to_quat(&self) -> DQuat {
        DQuat::from_axis_angle(self.axis, self.angle.to_radians())
    }

    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_axis_angle(self.axis, self.angle.to_radians())
    }

    /// Rotate a direction vector
    pub fn transform_dir(&self, dir: DVec3) -> DVec3 {
        self.to_quat() * dir
    }
}

/// Rotation part of an affine matrix with scale removed.
///
/// Degenerate (non-invertible) matrices yield the identity.
pub fn orthonormalized_rotation(matrix: &DMat4) -> DMat3 {
    let (_, rotation, _) = matrix.to_scale_rotation_translation();
    if rotation.is_finite() && rotation.length_squared() > 0.0 {
        DMat3::from_quat(rotation.normalize())
    } else {
        DMat3::IDENTITY
    }
}

/// Affine matrix keeping only rotation and translation
pub fn remove_scale_shear(matrix: &DMat4) -> DMat4 {
    let rotation = DQuat::from_mat3(&orthonormalized_rotation(matrix));
    DMat4::from_rotation_translation(rotation, matrix.w_axis.truncate())
}

/// Compose per-axis Euler angles (degrees), applying X, then Y, then Z
pub fn to_quaternion(euler_angles: DVec3) -> DQuat {
    let x = DQuat::from_rotation_x(euler_angles.x.to_radians());
    let y = DQuat::from_rotation_y(euler_angles.y.to_radians());
    let z = DQuat::from_rotation_z(euler_angles.z.to_radians());
    (z * y * x).normalize()
}

/// Decompose the rotation of `matrix` into per-axis Euler angles (degrees).
///
/// `hint` holds the previous angles; among the equivalent solutions the one
/// closest to it is returned, which keeps interactive edits continuous
/// across the ±180° seam. Results within [`EULER_ZERO_EPSILON`] of zero
/// are snapped to exactly zero.
pub fn decompose_to_euler(matrix: &DMat4, rot_order: RotationOrder, hint: DVec3) -> DVec3 {
    let [i, j, k] = rot_order.basis_indices();
    let rotation = orthonormalized_rotation(matrix);
    let at = |row: usize, col: usize| rotation.col(col)[row];

    let parity = if matches!((i, j, k), (0, 1, 2) | (1, 2, 0) | (2, 0, 1)) {
        1.0
    } else {
        -1.0
    };
    let hint = [
        hint[i].to_radians(),
        hint[j].to_radians(),
        hint[k].to_radians(),
    ];

    let sin_middle = (-parity * at(k, i)).clamp(-1.0, 1.0);
    let angles = if sin_middle.abs() > GIMBAL_LOCK_THRESHOLD {
        // First and last axes coincide; keep the first angle from the hint
        let first = hint[0];
        let rest = rotation * elemental_rotation(i, first).transpose();
        let last = (-parity * rest.col(j)[i]).atan2(rest.col(j)[j]);
        [first, sin_middle.asin(), nearest_equivalent(last, hint[2])]
    } else {
        let first = (parity * at(k, j)).atan2(at(k, k));
        let middle = sin_middle.asin();
        let last = (parity * at(j, i)).atan2(at(i, i));

        let primary = align_to_hint([first, middle, last], hint);
        let alternate = align_to_hint([first + PI, PI - middle, last + PI], hint);
        if hint_distance(&alternate, &hint) < hint_distance(&primary, &hint) {
            alternate
        } else {
            primary
        }
    };

    let mut result = DVec3::ZERO;
    for (angle, axis) in angles.into_iter().zip([i, j, k]) {
        let degrees = angle.to_degrees();
        result[axis] = if degrees.abs() < EULER_ZERO_EPSILON {
            0.0
        } else {
            degrees
        };
    }
    result
}

fn elemental_rotation(axis: usize, angle: f64) -> DMat3 {
    match axis {
        0 => DMat3::from_rotation_x(angle),
        1 => DMat3::from_rotation_y(angle),
        _ => DMat3::from_rotation_z(angle),
    }
}

/// `angle` shifted by whole turns to lie closest to `hint`
fn nearest_equivalent(angle: f64, hint: f64) -> f64 {
    angle + TAU * ((hint - angle) / TAU).round()
}

fn align_to_hint(angles: [f64; 3], hint: [f64; 3]) -> [f64; 3] {
    [
        nearest_equivalent(angles[0], hint[0]),
        nearest_equivalent(angles[1], hint[1]),
        nearest_equivalent(angles[2], hint[2]),
    ]
}

fn hint_distance(angles: &[f64; 3], hint: &[f64; 3]) -> f64 {
    angles
        .iter()
        .zip(hint)
        .map(|(angle, hint)| (angle - hint).abs())
        .sum()
}
