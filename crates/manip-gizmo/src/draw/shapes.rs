//! Gizmo shape builders
//!
//! Each function submits one or more [`Drawable`]s describing a handle in
//! gizmo space. Vertices are single precision, like everything handed to
//! the draw manager.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3, Vec4};

use super::{DrawManager, Drawable, PaintStyle, PrimitiveType};

const CIRCLE_SEGMENTS: usize = 50;
const HALF_CIRCLE_SEGMENTS: usize = 30;
const CONE_SEGMENTS: usize = 30;
const ARC_SEGMENTS: usize = 30;

/// Plane in Hessian normal form, `dot(normal, p) == distance` on the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Plane through `point` with `normal` (normalized here)
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

fn circle_point(orig: Vec3, vtx: Vec3, vty: Vec3, angle: f32) -> Vec3 {
    orig + vtx * angle.cos() + vty * angle.sin()
}

/// Axis arrow: a shaft from `orig` to `orig + axis * length` and a cone
/// from there to `orig + axis`.
///
/// `vtx` and `vty` span the cone base, `radius` is its radius.
#[allow(clippy::too_many_arguments)]
pub fn draw_axis(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    model: Mat4,
    color: Vec4,
    orig: Vec3,
    axis: Vec3,
    vtx: Vec3,
    vty: Vec3,
    radius: f32,
    length: f32,
    selection_id: u32,
) {
    draw_manager.submit(
        Drawable::new(PrimitiveType::Lines, vec![orig, orig + axis * length])
            .with_color(color)
            .with_mvp(mvp)
            .with_line_width(2.0)
            .with_selection_id(selection_id),
    );

    let tip = orig + axis;
    let height = axis.length() * (1.0 - length);
    let axis_dir = axis.normalize_or_zero();
    let side_normal = |radial: Vec3| (radial * height + axis_dir * radius).normalize_or_zero();

    let mut vertices = Vec::with_capacity(CONE_SEGMENTS * 3);
    let mut normals = Vec::with_capacity(CONE_SEGMENTS * 3);
    for i in 0..CONE_SEGMENTS {
        let a0 = TAU / CONE_SEGMENTS as f32 * i as f32;
        let a1 = TAU / CONE_SEGMENTS as f32 * (i + 1) as f32;
        let r0 = circle_point(Vec3::ZERO, vtx, vty, a0);
        let r1 = circle_point(Vec3::ZERO, vtx, vty, a1);
        let n0 = side_normal(r0.normalize_or_zero());
        let n1 = side_normal(r1.normalize_or_zero());

        vertices.extend([orig + axis * length + r0 * radius, orig + axis * length + r1 * radius, tip]);
        normals.extend([n0, n1, (n0 + n1).normalize_or_zero()]);
    }

    draw_manager.submit(
        Drawable::new(PrimitiveType::Triangles, vertices)
            .with_normals(normals)
            .with_color(color)
            .with_mvp(mvp)
            .with_model(model)
            .with_paint_style(PaintStyle::Shaded)
            .with_selection_id(selection_id),
    );
}

/// Axis-aligned cube of half extent `size` centered on the origin
pub fn draw_cube(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    model: Mat4,
    color: Vec4,
    size: f32,
    depth_priority: u32,
    selection_id: u32,
) {
    // (normal, u, v) with u x v == normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    const CORNERS: [(f32, f32); 6] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)];

    let mut vertices = Vec::with_capacity(36);
    let mut normals = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        for (su, sv) in CORNERS {
            vertices.push((normal + u * su + v * sv) * size);
            normals.push(normal);
        }
    }

    draw_manager.submit(
        Drawable::new(PrimitiveType::Triangles, vertices)
            .with_normals(normals)
            .with_color(color)
            .with_mvp(mvp)
            .with_model(model)
            .with_paint_style(PaintStyle::Shaded)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
}

/// Circle outline spanned by `vtx` and `vty` around `orig`
#[allow(clippy::too_many_arguments)]
pub fn draw_circle(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    color: Vec4,
    orig: Vec3,
    vtx: Vec3,
    vty: Vec3,
    line_width: f32,
    depth_priority: u32,
    selection_id: u32,
) {
    let vertices = (0..CIRCLE_SEGMENTS)
        .map(|i| circle_point(orig, vtx, vty, TAU / CIRCLE_SEGMENTS as f32 * i as f32))
        .collect();

    draw_manager.submit(
        Drawable::new(PrimitiveType::LineLoop, vertices)
            .with_color(color)
            .with_mvp(mvp)
            .with_line_width(line_width)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
}

/// Half circle from `vtx` through `vty` to `-vtx`, keeping only the points
/// on the negative side of `camera_plane` (the side facing the camera).
#[allow(clippy::too_many_arguments)]
pub fn draw_circle_half(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    color: Vec4,
    orig: Vec3,
    vtx: Vec3,
    vty: Vec3,
    camera_plane: &Plane,
    depth_priority: u32,
    selection_id: u32,
) {
    let vertices = (0..HALF_CIRCLE_SEGMENTS)
        .map(|i| circle_point(orig, vtx, vty, PI / HALF_CIRCLE_SEGMENTS as f32 * i as f32))
        .filter(|p| camera_plane.signed_distance(*p) < 0.0)
        .collect();

    draw_manager.submit(
        Drawable::new(PrimitiveType::LineStrip, vertices)
            .with_color(color)
            .with_mvp(mvp)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
}

/// Filled quad with an outline.
///
/// The fill is flattened to normalized device coordinates so it never
/// fights with scene depth; the outline keeps its 3D position.
#[allow(clippy::too_many_arguments)]
pub fn draw_outlined_quad(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    color: Vec4,
    outline_color: Vec4,
    vertices: &[Vec3],
    outline_width: f32,
    depth_priority: u32,
    selection_id: u32,
) {
    let screen_space = vertices
        .iter()
        .map(|v| {
            let clip = mvp * v.extend(1.0);
            Vec3::new(clip.x / clip.w, clip.y / clip.w, 0.0)
        })
        .collect();

    draw_manager.submit(
        Drawable::new(PrimitiveType::TriangleFan, screen_space)
            .with_color(color)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
    draw_manager.submit(
        Drawable::new(PrimitiveType::LineLoop, vertices.to_vec())
            .with_color(outline_color)
            .with_mvp(mvp)
            .with_line_width(outline_width)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
}

/// Filled disc with an outline
#[allow(clippy::too_many_arguments)]
pub fn draw_outlined_circle(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    color: Vec4,
    outline_color: Vec4,
    orig: Vec3,
    vtx: Vec3,
    vty: Vec3,
    outline_width: f32,
    depth_priority: u32,
    selection_id: u32,
) {
    let rim: Vec<Vec3> = (0..=CIRCLE_SEGMENTS)
        .map(|i| circle_point(orig, vtx, vty, TAU / CIRCLE_SEGMENTS as f32 * i as f32))
        .collect();
    let mut fan = Vec::with_capacity(rim.len() + 1);
    fan.push(orig);
    fan.extend_from_slice(&rim);

    draw_manager.submit(
        Drawable::new(PrimitiveType::TriangleFan, fan)
            .with_color(color)
            .with_mvp(mvp)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
    draw_manager.submit(
        Drawable::new(PrimitiveType::LineLoop, rim)
            .with_color(outline_color)
            .with_mvp(mvp)
            .with_line_width(outline_width)
            .with_depth_priority(depth_priority)
            .with_selection_id(selection_id),
    );
}

/// Triangle fan vertices of a circular sector.
///
/// The sector starts at `start` and sweeps clockwise about `normal` until it
/// reaches `end`. Callers wanting the counter-clockwise sector swap the two
/// vectors.
///
/// # Arguments
///
/// * `center` - Apex of the sector, emitted as the first vertex.
/// * `start` - Direction of the first edge (need not be normalized).
/// * `end` - Direction of the last edge (need not be normalized).
/// * `normal` - Sector plane normal, defining the sweep orientation.
/// * `radius` - Radius of the sector.
///
/// # Returns
///
/// `center` followed by the rim points from `start` to `end`. Parallel
/// edges produce an empty sector, opposite edges a half disc.
pub fn arc_vertices(center: Vec3, start: Vec3, end: Vec3, normal: Vec3, radius: f32) -> Vec<Vec3> {
    let start = start.normalize_or_zero();
    let end = end.normalize_or_zero();
    let normal = normal.normalize_or_zero();

    let cos = start.dot(end);
    let sweep = if cos.abs() > 0.999 {
        if cos > 0.0 { 0.0 } else { -PI }
    } else {
        let angle = start.cross(end).dot(normal).atan2(cos);
        if angle < 0.0 { angle } else { angle - TAU }
    };

    let mut vertices = Vec::with_capacity(ARC_SEGMENTS + 2);
    vertices.push(center);
    for i in 0..=ARC_SEGMENTS {
        let rotation = Quat::from_axis_angle(normal, sweep * i as f32 / ARC_SEGMENTS as f32);
        vertices.push(center + rotation * start * radius);
    }
    vertices
}

/// Filled circular sector, see [`arc_vertices`]
#[allow(clippy::too_many_arguments)]
pub fn draw_arc(
    draw_manager: &mut dyn DrawManager,
    mvp: Mat4,
    color: Vec4,
    center: Vec3,
    start: Vec3,
    end: Vec3,
    normal: Vec3,
    radius: f32,
    depth_priority: u32,
) {
    draw_manager.submit(
        Drawable::new(PrimitiveType::TriangleFan, arc_vertices(center, start, end, normal, radius))
            .with_color(color)
            .with_mvp(mvp)
            .with_paint_style(PaintStyle::Stippled)
            .with_depth_priority(depth_priority),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arc_sweeps_clockwise() {
        let vertices = arc_vertices(Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 2.0);
        assert_eq!(vertices.len(), ARC_SEGMENTS + 2);
        assert_eq!(vertices[0], Vec3::ZERO);
        assert_abs_diff_eq!(vertices[1], Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-5);
        assert_abs_diff_eq!(*vertices.last().unwrap(), Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-5);
        // Long way round: halfway point sits at -135 degrees
        let mid = vertices[1 + ARC_SEGMENTS / 2];
        assert_abs_diff_eq!(mid, Vec3::new(-2.0, -2.0, 0.0).normalize() * 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_arc_short_clockwise_sector() {
        let vertices = arc_vertices(Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::Z, 1.0);
        let mid = vertices[1 + ARC_SEGMENTS / 2];
        assert_abs_diff_eq!(mid, Vec3::new(1.0, 1.0, 0.0).normalize(), epsilon = 1e-5);
    }

    #[test]
    fn test_circle_half_faces_camera() {
        let mut list = DrawList::new();
        // Camera looks down -Z, so the plane normal is the view direction
        let plane = Plane::from_normal_point(Vec3::NEG_Z, Vec3::ZERO);
        draw_circle_half(&mut list, Mat4::IDENTITY, Vec4::ONE, Vec3::ZERO, Vec3::X, Vec3::Z, &plane, 1, 7);

        let drawable = &list.drawables()[0];
        assert_eq!(drawable.primitive, PrimitiveType::LineStrip);
        assert_eq!(drawable.selection_id, 7);
        // The first point lies on the plane and is dropped
        assert_eq!(drawable.vertices.len(), HALF_CIRCLE_SEGMENTS - 1);
        assert!(drawable.vertices.iter().all(|v| v.z > 0.0));
    }

    #[test]
    fn test_cube_has_outward_normals() {
        let mut list = DrawList::new();
        draw_cube(&mut list, Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE, 0.5, 0, 3);

        let cube = &list.drawables()[0];
        assert_eq!(cube.vertices.len(), 36);
        assert_eq!(cube.normals.len(), 36);
        for (vertex, normal) in cube.vertices.iter().zip(&cube.normals) {
            assert_abs_diff_eq!(vertex.dot(*normal), 0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_outlined_quad_fill_is_flattened() {
        let mut list = DrawList::new();
        let quad = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
        let mvp = Mat4::from_scale(Vec3::splat(0.5)) * Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0));
        draw_outlined_quad(&mut list, mvp, Vec4::ONE, Vec4::ONE, &quad, 1.0, 1, 4);

        let [fill, outline] = list.drawables() else {
            panic!("expected fill and outline");
        };
        assert_eq!(fill.mvp, Mat4::IDENTITY);
        assert_abs_diff_eq!(fill.vertices[2], Vec3::new(0.5, 0.5, 0.0), epsilon = 1e-6);
        assert_eq!(outline.primitive, PrimitiveType::LineLoop);
        assert_eq!(outline.vertices, quad.to_vec());
    }

    #[test]
    fn test_axis_submits_shaft_and_cone() {
        let mut list = DrawList::new();
        draw_axis(&mut list, Mat4::IDENTITY, Mat4::IDENTITY, Vec4::ONE, Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z, 0.05, 0.83, 9);

        assert_eq!(list.drawables_for(9).count(), 2);
        let shaft = &list.drawables()[0];
        assert_abs_diff_eq!(shaft.vertices[1], Vec3::new(0.83, 0.0, 0.0), epsilon = 1e-6);
        let cone = &list.drawables()[1];
        assert_eq!(cone.paint_style, PaintStyle::Shaded);
        assert!(cone.vertices.iter().all(|v| v.x >= 0.83 - 1e-6));
    }
}
