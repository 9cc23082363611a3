//! Draw manager boundary
//!
//! Manipulators never talk to a graphics API. They describe their handles as
//! [`Drawable`]s tagged with selection ids and hand them to a
//! [`DrawManager`], which is also the source of the currently hovered id.

pub mod shapes;

use glam::{Mat4, Vec3, Vec4};

/// Selection id meaning "no handle"
pub const NO_SELECTION: u32 = 0;

/// Primitive topology of a drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveType {
    #[default]
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleFan,
    Points,
}

/// Fill style of a drawable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintStyle {
    #[default]
    Flat,
    /// Lit using per-vertex normals
    Shaded,
    Stippled,
}

/// One draw call submitted by a manipulator
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub primitive: PrimitiveType,
    pub paint_style: PaintStyle,
    pub color: Vec4,
    /// Model-view-projection applied to `vertices`
    pub mvp: Mat4,
    /// Model matrix used for shading
    pub model: Mat4,
    pub line_width: f32,
    pub point_size: f32,
    /// Higher priorities are drawn on top
    pub depth_priority: u32,
    /// Handle id reported back when hovered, [`NO_SELECTION`] if not pickable
    pub selection_id: u32,
    pub vertices: Vec<Vec3>,
    /// Per-vertex normals, only for [`PaintStyle::Shaded`]
    pub normals: Vec<Vec3>,
}

impl Default for Drawable {
    fn default() -> Self {
        Self {
            primitive: PrimitiveType::Lines,
            paint_style: PaintStyle::Flat,
            color: Vec4::ONE,
            mvp: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            line_width: 1.0,
            point_size: 1.0,
            depth_priority: 0,
            selection_id: NO_SELECTION,
            vertices: Vec::new(),
            normals: Vec::new(),
        }
    }
}

impl Drawable {
    /// Flat drawable of the given topology
    pub fn new(primitive: PrimitiveType, vertices: Vec<Vec3>) -> Self {
        Self {
            primitive,
            vertices,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_mvp(mut self, mvp: Mat4) -> Self {
        self.mvp = mvp;
        self
    }

    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model;
        self
    }

    pub fn with_paint_style(mut self, paint_style: PaintStyle) -> Self {
        self.paint_style = paint_style;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_point_size(mut self, point_size: f32) -> Self {
        self.point_size = point_size;
        self
    }

    pub fn with_depth_priority(mut self, depth_priority: u32) -> Self {
        self.depth_priority = depth_priority;
        self
    }

    pub fn with_selection_id(mut self, selection_id: u32) -> Self {
        self.selection_id = selection_id;
        self
    }

    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Self {
        self.normals = normals;
        self
    }
}

/// Host renderer interface consumed by the manipulators
pub trait DrawManager {
    /// Allocate a new, unique, non-zero selection id
    fn create_selection_id(&mut self) -> u32;

    /// Id of the handle under the mouse, [`NO_SELECTION`] if none
    fn current_selection(&self) -> u32;

    /// Queue a drawable for this frame
    fn submit(&mut self, drawable: Drawable);
}

/// In-memory draw manager recording submitted drawables
#[derive(Debug, Default)]
pub struct DrawList {
    drawables: Vec<Drawable>,
    selection_counter: u32,
    hovered: u32,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id reported by [`DrawManager::current_selection`]
    pub fn set_current_selection(&mut self, selection_id: u32) {
        self.hovered = selection_id;
    }

    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// Drawables tagged with a selection id
    pub fn drawables_for(&self, selection_id: u32) -> impl Iterator<Item = &Drawable> {
        self.drawables
            .iter()
            .filter(move |d| d.selection_id == selection_id)
    }

    /// Drawables in submission order, stable-sorted by ascending priority
    pub fn sorted_by_priority(&self) -> Vec<&Drawable> {
        let mut sorted: Vec<_> = self.drawables.iter().collect();
        sorted.sort_by_key(|d| d.depth_priority);
        sorted
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Start a new frame; allocated selection ids stay valid
    pub fn clear(&mut self) {
        self.drawables.clear();
    }

    /// Take the recorded drawables, leaving the list empty
    pub fn take(&mut self) -> Vec<Drawable> {
        std::mem::take(&mut self.drawables)
    }
}

impl DrawManager for DrawList {
    fn create_selection_id(&mut self) -> u32 {
        self.selection_counter += 1;
        self.selection_counter
    }

    fn current_selection(&self) -> u32 {
        self.hovered
    }

    fn submit(&mut self, drawable: Drawable) {
        self.drawables.push(drawable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_ids_start_at_one() {
        let mut list = DrawList::new();
        assert_eq!(list.current_selection(), NO_SELECTION);
        assert_eq!(list.create_selection_id(), 1);
        assert_eq!(list.create_selection_id(), 2);
    }

    #[test]
    fn test_clear_keeps_ids() {
        let mut list = DrawList::new();
        let id = list.create_selection_id();
        list.submit(Drawable::new(PrimitiveType::Points, vec![Vec3::ZERO]).with_selection_id(id));
        assert_eq!(list.drawables_for(id).count(), 1);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.create_selection_id(), id + 1);
    }

    #[test]
    fn test_sorted_by_priority_is_stable() {
        let mut list = DrawList::new();
        list.submit(Drawable::new(PrimitiveType::Lines, vec![]).with_depth_priority(2).with_line_width(1.0));
        list.submit(Drawable::new(PrimitiveType::Lines, vec![]).with_depth_priority(0));
        list.submit(Drawable::new(PrimitiveType::Lines, vec![]).with_depth_priority(2).with_line_width(3.0));

        let sorted = list.sorted_by_priority();
        assert_eq!(sorted[0].depth_priority, 0);
        assert_eq!(sorted[1].line_width, 1.0);
        assert_eq!(sorted[2].line_width, 3.0);
    }
}
