//! Pivot editing on top of the move gizmo.
//!
//! The editor owns a [`MoveManipulator`] placed at the pivot and forwards
//! every drag to a [`PivotCommand`], which owns the actual pivot state and
//! its undo block.

use glam::{DMat4, DQuat, DVec3, Vec3};
use manip_core::{Rotation, SharedSnapStrategy, ViewportView};

use crate::colors;
use crate::draw::shapes::{draw_circle, draw_outlined_circle};
use crate::draw::{DrawManager, Drawable, NO_SELECTION, PrimitiveType};
use crate::manipulator::{DrawFrame, Manipulator, MouseEvent, translation};
use crate::move_manipulator::{MoveManipulator, MoveMode};
use crate::rotate_manipulator::Orientation;

const INNER_DOT_SCALE: f64 = 0.025;
const RING_SCALE: f64 = 0.05;
const TICK_LENGTH: f32 = 0.08;

/// Pivot location of the edited selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotInfo {
    /// World-space pivot position
    pub position: DVec3,
    /// Pivot frame orientation
    pub orientation: DQuat,
}

/// Command collaborator that applies pivot edits to the scene
pub trait PivotCommand {
    /// Current pivot, `None` if the selection has none
    fn pivot_info(&self) -> Option<PivotInfo>;

    /// Whether the selection allows pivot edits
    fn can_edit(&self) -> bool;

    /// Open an undo block for a drag
    fn start_block(&mut self);

    /// Offset the pivot by `delta` from where it was at [`PivotCommand::start_block`]
    fn apply_delta(&mut self, delta: DVec3, rotation: Rotation);

    /// Commit the drag
    fn end_block(&mut self);

    /// Whether a block is open
    fn is_recording(&self) -> bool;
}

/// Interactive pivot editor
#[derive(Debug)]
pub struct PivotEditor<C> {
    command: C,
    manipulator: MoveManipulator,
    orientation: Orientation,
}

impl<C: PivotCommand> PivotEditor<C> {
    /// Editor placed at the command's current pivot
    pub fn new(command: C, orientation: Orientation) -> Self {
        let mut editor = Self {
            command,
            manipulator: MoveManipulator::new(),
            orientation,
        };
        editor.set_orientation(orientation);
        editor
    }

    /// Start a drag; `false` if no pivot handle was hit
    pub fn on_mouse_press(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) -> bool {
        self.manipulator.on_mouse_press(event, view, draw_manager);
        if self.manipulator.move_mode() == MoveMode::None {
            return false;
        }
        self.command.start_block();
        true
    }

    /// Forward the drag to the command; `false` when not dragging
    pub fn on_mouse_move(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) -> bool {
        if self.manipulator.move_mode() == MoveMode::None {
            return false;
        }
        self.manipulator.on_mouse_move(event, view, draw_manager);
        self.command.apply_delta(self.manipulator.delta(), Rotation::IDENTITY);
        true
    }

    /// Commit the drag and move the gizmo onto the committed pivot
    pub fn on_mouse_release(&mut self, event: &MouseEvent, view: &ViewportView, draw_manager: &dyn DrawManager) -> bool {
        if self.manipulator.move_mode() == MoveMode::None {
            return false;
        }
        self.manipulator.on_mouse_release(event, view, draw_manager);
        self.command.end_block();
        self.set_orientation(self.orientation);
        true
    }

    /// Draw the move gizmo and the pivot crosshair
    pub fn draw(&mut self, view: &ViewportView, draw_manager: &mut dyn DrawManager) {
        self.manipulator.draw(view, draw_manager);

        let center = translation(self.manipulator.gizmo_matrix());
        let Some(frame) = DrawFrame::new(view, center) else {
            return;
        };
        let sf = frame.screen_factor;
        let at_pivot = frame.view_proj * DMat4::from_translation(center);
        let scaled = |factor: f64| (at_pivot * DMat4::from_scale(DVec3::splat(factor))).as_mat4();

        let up = frame.frustum.up_vector().as_vec3().normalize_or_zero();
        let right = up.cross(frame.frustum.view_direction().as_vec3()).normalize_or_zero();

        draw_outlined_circle(
            draw_manager,
            scaled(INNER_DOT_SCALE * sf),
            colors::LOCATE,
            colors::LOCATE,
            Vec3::ZERO,
            right,
            up,
            1.0,
            0,
            NO_SELECTION,
        );
        draw_circle(
            draw_manager,
            scaled(RING_SCALE * sf),
            colors::LOCATE,
            Vec3::ZERO,
            right,
            up,
            1.0,
            0,
            NO_SELECTION,
        );

        let ticks = [up, right, -up, -right]
            .into_iter()
            .flat_map(|dir| [Vec3::ZERO, dir * TICK_LENGTH])
            .collect();
        draw_manager.submit(
            Drawable::new(PrimitiveType::Lines, ticks)
                .with_color(colors::LOCATE)
                .with_mvp(scaled(sf)),
        );
    }

    /// Whether a pivot drag is being recorded
    pub fn is_editing(&self) -> bool {
        self.command.is_recording()
    }

    /// Re-read the pivot and align the gizmo with it, or with the world axes
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        let Some(pivot) = self.command.pivot_info() else {
            tracing::debug!("Selection has no pivot to edit");
            return;
        };
        let rotation = match orientation {
            Orientation::World => DQuat::IDENTITY,
            _ => pivot.orientation,
        };
        self.manipulator
            .set_gizmo_matrix(DMat4::from_rotation_translation(rotation, pivot.position));
        self.manipulator.set_locked(!self.command.can_edit());
    }

    /// Current gizmo alignment
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Snap the pivot drag
    pub fn set_snap_strategy(&mut self, snap_strategy: Option<SharedSnapStrategy>) {
        self.manipulator.set_snap_strategy(snap_strategy);
    }

    /// Underlying move gizmo
    pub fn manipulator(&self) -> &MoveManipulator {
        &self.manipulator
    }

    /// Command collaborator
    pub fn command(&self) -> &C {
        &self.command
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;
    use crate::manipulator::test_support::ortho_view;
    use approx::assert_abs_diff_eq;

    #[derive(Debug, Default)]
    struct FakePivotCommand {
        pivot: Option<PivotInfo>,
        read_only: bool,
        recording: bool,
        block_start: DVec3,
        deltas: Vec<DVec3>,
        blocks: usize,
    }

    impl FakePivotCommand {
        fn at(position: DVec3, orientation: DQuat) -> Self {
            Self {
                pivot: Some(PivotInfo { position, orientation }),
                ..Default::default()
            }
        }
    }

    impl PivotCommand for FakePivotCommand {
        fn pivot_info(&self) -> Option<PivotInfo> {
            self.pivot
        }

        fn can_edit(&self) -> bool {
            !self.read_only
        }

        fn start_block(&mut self) {
            self.recording = true;
            self.block_start = self.pivot.map_or(DVec3::ZERO, |p| p.position);
        }

        fn apply_delta(&mut self, delta: DVec3, rotation: Rotation) {
            assert_eq!(rotation, Rotation::IDENTITY);
            self.deltas.push(delta);
            if let Some(pivot) = &mut self.pivot {
                pivot.position = self.block_start + delta;
            }
        }

        fn end_block(&mut self) {
            self.recording = false;
            self.blocks += 1;
        }

        fn is_recording(&self) -> bool {
            self.recording
        }
    }

    fn drawn_editor(command: FakePivotCommand, orientation: Orientation) -> (PivotEditor<FakePivotCommand>, DrawList) {
        let mut editor = PivotEditor::new(command, orientation);
        let mut list = DrawList::new();
        editor.draw(&ortho_view(), &mut list);
        list.clear();
        (editor, list)
    }

    #[test]
    fn test_orientation_aligns_gizmo() {
        let tilted = DQuat::from_rotation_z(0.5);
        let position = DVec3::new(1.0, 2.0, 0.0);

        let editor = PivotEditor::new(FakePivotCommand::at(position, tilted), Orientation::Object);
        let expected = DMat4::from_rotation_translation(tilted, position);
        assert_abs_diff_eq!(*editor.manipulator().gizmo_matrix(), expected, epsilon = 1e-12);

        let mut editor = editor;
        editor.set_orientation(Orientation::World);
        assert_abs_diff_eq!(*editor.manipulator().gizmo_matrix(), DMat4::from_translation(position), epsilon = 1e-12);
        assert_eq!(editor.orientation(), Orientation::World);
    }

    #[test]
    fn test_drag_moves_pivot() {
        let (mut editor, mut list) = drawn_editor(FakePivotCommand::at(DVec3::ZERO, DQuat::IDENTITY), Orientation::Object);
        let view = ortho_view();
        list.set_current_selection(editor.manipulator().handle_id(MoveMode::Y));

        assert!(editor.on_mouse_press(&MouseEvent::new(100, 100), &view, &list));
        assert!(editor.is_editing());
        assert!(editor.on_mouse_move(&MouseEvent::new(100, 50), &view, &list));
        assert_abs_diff_eq!(editor.command().deltas[0], DVec3::new(0.0, 5.0, 0.0), epsilon = 1e-9);

        assert!(editor.on_mouse_release(&MouseEvent::new(100, 50), &view, &list));
        assert!(!editor.is_editing());
        assert_eq!(editor.command().blocks, 1);
        assert_abs_diff_eq!(
            translation(editor.manipulator().gizmo_matrix()),
            DVec3::new(0.0, 5.0, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_press_off_handle_is_not_handled() {
        let (mut editor, list) = drawn_editor(FakePivotCommand::at(DVec3::ZERO, DQuat::IDENTITY), Orientation::Object);
        let view = ortho_view();
        assert!(!editor.on_mouse_press(&MouseEvent::new(100, 100), &view, &list));
        assert!(!editor.on_mouse_move(&MouseEvent::new(100, 50), &view, &list));
        assert!(!editor.on_mouse_release(&MouseEvent::new(100, 50), &view, &list));
        assert!(!editor.is_editing());
        assert!(editor.command().deltas.is_empty());
    }

    #[test]
    fn test_read_only_pivot_locks_gizmo() {
        let command = FakePivotCommand {
            read_only: true,
            ..FakePivotCommand::at(DVec3::ZERO, DQuat::IDENTITY)
        };
        let (mut editor, mut list) = drawn_editor(command, Orientation::Object);
        assert!(editor.manipulator().is_locked());

        list.set_current_selection(editor.manipulator().handle_id(MoveMode::X));
        assert!(!editor.on_mouse_press(&MouseEvent::new(100, 100), &ortho_view(), &list));
    }

    #[test]
    fn test_missing_pivot_keeps_gizmo() {
        let editor = PivotEditor::new(FakePivotCommand::default(), Orientation::Object);
        assert_eq!(*editor.manipulator().gizmo_matrix(), DMat4::IDENTITY);
        assert!(!editor.manipulator().is_locked());
    }

    #[test]
    fn test_draw_adds_crosshair() {
        let (mut editor, mut list) = drawn_editor(FakePivotCommand::at(DVec3::ZERO, DQuat::IDENTITY), Orientation::Object);
        editor.draw(&ortho_view(), &mut list);

        let crosshair: Vec<_> = list.drawables_for(NO_SELECTION).collect();
        assert_eq!(crosshair.len(), 4);
        assert!(crosshair.iter().all(|d| d.color == colors::LOCATE));
        let ticks = crosshair[3];
        assert_eq!(ticks.primitive, PrimitiveType::Lines);
        assert_eq!(ticks.vertices.len(), 8);
        assert_abs_diff_eq!(ticks.vertices[1], Vec3::new(0.0, 0.08, 0.0), epsilon = 1e-6);
    }
}
