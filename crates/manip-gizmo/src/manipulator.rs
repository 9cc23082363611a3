//! Manipulator interface and shared handle bookkeeping

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use glam::{DMat4, DVec3};
use manip_core::constants::GIZMO_CAMERA_EPSILON;
use manip_core::utils::{compute_screen_factor, compute_view_frustum};
use manip_core::{Frustum, ViewportView};

use crate::draw::{DrawManager, NO_SELECTION};

/// Mouse position in viewport pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseEvent {
    /// Horizontal pixel coordinate
    pub x: i32,
    /// Vertical pixel coordinate, growing downwards
    pub y: i32,
}

impl MouseEvent {
    /// Create an event at pixel `(x, y)`
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Interactive viewport gizmo driven by mouse events.
///
/// A drag session is press, any number of moves, release. Press only
/// starts a session when the draw manager reports one of this
/// manipulator's handles under the mouse; the host falls through to its
/// own selection otherwise (see [`Manipulator::is_picked`]).
pub trait Manipulator {
    /// Start a drag on the hovered handle
    fn on_mouse_press(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager);

    /// Update the active drag
    fn on_mouse_move(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager);

    /// End the active drag
    fn on_mouse_release(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager);

    /// Submit the gizmo geometry, allocating handle ids on first use
    fn draw(&mut self, view: &ViewportView, draw_manager: &mut dyn DrawManager);

    /// Whether a drag session is active
    fn is_picked(&self) -> bool;
}

/// Interaction mode owning a pickable handle
pub trait HandleMode: Copy + Eq + Hash + Debug + 'static {
    /// Every mode with a handle, in id allocation order
    const HANDLES: &'static [Self];
}

/// Bidirectional map between selection ids and interaction modes.
///
/// Filled once, on the first draw; ids stay stable afterwards.
#[derive(Debug, Clone)]
pub struct HandleIds<M> {
    id_to_mode: HashMap<u32, M>,
    mode_to_id: HashMap<M, u32>,
}

impl<M: HandleMode> Default for HandleIds<M> {
    fn default() -> Self {
        Self {
            id_to_mode: HashMap::new(),
            mode_to_id: HashMap::new(),
        }
    }
}

impl<M: HandleMode> HandleIds<M> {
    /// Whether ids have been allocated
    pub fn is_initialized(&self) -> bool {
        !self.mode_to_id.is_empty()
    }

    /// Allocate one id per handle unless already done
    pub fn ensure(&mut self, draw_manager: &mut dyn DrawManager) {
        if self.is_initialized() {
            return;
        }
        for &mode in M::HANDLES {
            let id = draw_manager.create_selection_id();
            self.id_to_mode.insert(id, mode);
            self.mode_to_id.insert(mode, id);
        }
        tracing::debug!(handles = ?self.mode_to_id, "Allocated gizmo handle ids");
    }

    /// Mode whose handle has `id`
    pub fn mode(&self, id: u32) -> Option<M> {
        self.id_to_mode.get(&id).copied()
    }

    /// Id of the handle for `mode`, [`NO_SELECTION`] before allocation
    pub fn id(&self, mode: M) -> u32 {
        self.mode_to_id.get(&mode).copied().unwrap_or(NO_SELECTION)
    }
}

/// Per-frame camera data shared by the manipulator draw routines
#[derive(Debug, Clone, Copy)]
pub(crate) struct DrawFrame {
    /// Frustum conformed to the viewport
    pub frustum: Frustum,
    pub screen_factor: f64,
    pub view: DMat4,
    pub view_proj: DMat4,
}

impl DrawFrame {
    /// `None` when nothing should be drawn: invalid view, or the gizmo
    /// sits on the eye point
    pub fn new(view: &ViewportView, center: DVec3) -> Option<Self> {
        if !view.is_valid() {
            return None;
        }
        let frustum = compute_view_frustum(view);
        if center.distance(frustum.position) <= GIZMO_CAMERA_EPSILON {
            return None;
        }

        let view_matrix = frustum.view_matrix();
        Some(Self {
            frustum,
            screen_factor: compute_screen_factor(view, center),
            view: view_matrix,
            view_proj: frustum.projection_matrix() * view_matrix,
        })
    }
}

pub(crate) fn translation(matrix: &DMat4) -> DVec3 {
    matrix.w_axis.truncate()
}

/// Component of `v` along the unit vector `dir`
pub(crate) fn project_onto(v: DVec3, dir: DVec3) -> DVec3 {
    dir * v.dot(dir)
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::DVec3;
    use manip_core::{Frustum, ViewportDimensions, ViewportView};

    /// Orthographic view down -Z: 200x200 pixels over 20x20 world units,
    /// so one pixel is 0.1 units and the screen factor is 3
    pub fn ortho_view() -> ViewportView {
        let frustum = Frustum::orthographic(DVec3::new(0.0, 0.0, 10.0), DVec3::ZERO, DVec3::Y, 20.0, 1.0, 0.1, 100.0);
        ViewportView::new(frustum, ViewportDimensions::new(200, 200))
    }
}
