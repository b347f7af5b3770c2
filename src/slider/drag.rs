//! Drag interaction state machine.
//!
//! Turns a pointer gesture (down, moves, up/cancel) into value updates on a
//! [`RangeModel`]. Movement is applied incrementally from the last pointer
//! position, so an off-center grab does not make the thumb jump.

use bevy::log::debug;
use bevy::math::Vec2;

use super::model::{RangeModel, Thumb};

/// Gesture state of a range slider.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingLower,
    DraggingUpper,
}

impl DragState {
    fn dragging(thumb: Thumb) -> Self {
        match thumb {
            Thumb::Lower => Self::DraggingLower,
            Thumb::Upper => Self::DraggingUpper,
        }
    }

    /// The thumb owning the gesture, if any.
    pub fn thumb(self) -> Option<Thumb> {
        match self {
            Self::Idle => None,
            Self::DraggingLower => Some(Thumb::Lower),
            Self::DraggingUpper => Some(Thumb::Upper),
        }
    }
}

/// Notification emitted after every drag-move step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeChanged {
    pub lower: f64,
    pub upper: f64,
}

impl RangeChanged {
    pub fn from_model(model: &RangeModel) -> Self {
        Self {
            lower: model.lower_value(),
            upper: model.upper_value(),
        }
    }
}

/// Tracks which thumb owns the current gesture and where the pointer was last.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct DragController {
    state: DragState,
    last_pointer_position: Vec2,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn active_thumb(&self) -> Option<Thumb> {
        self.state.thumb()
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn last_pointer_position(&self) -> Vec2 {
        self.last_pointer_position
    }

    /// Starts a gesture at `position` (widget-local pixels).
    ///
    /// The lower thumb is tested first and wins where the two overlap.
    /// Returns `false` when neither thumb was hit; the gesture is then not
    /// claimed and should be left to the host.
    pub fn pointer_down(&mut self, model: &RangeModel, position: Vec2) -> bool {
        self.last_pointer_position = position;
        let hit = [Thumb::Lower, Thumb::Upper]
            .into_iter()
            .find(|&thumb| model.hit_rect(thumb).contains(position));

        self.state = hit.map_or(DragState::Idle, DragState::dragging);
        match hit {
            Some(thumb) => debug!("Range slider gesture claimed by {thumb:?} thumb"),
            None => debug!("Range slider gesture at {position} not claimed"),
        }
        hit.is_some()
    }

    /// Continues the gesture, moving the active thumb by the horizontal
    /// distance since the last pointer position.
    ///
    /// Returns `None` when no gesture is active.
    pub fn pointer_move(&mut self, model: &mut RangeModel, position: Vec2) -> Option<RangeChanged> {
        let thumb = self.state.thumb()?;

        let delta_value = model.value_delta_for_pixels(position.x - self.last_pointer_position.x);
        self.last_pointer_position = position;

        let current = model.value(thumb);
        model.set_value(thumb, current + delta_value);

        Some(RangeChanged::from_model(model))
    }

    /// Ends the gesture. The last applied values stay.
    pub fn pointer_up(&mut self) {
        if let Some(thumb) = self.state.thumb() {
            debug!("Range slider released {thumb:?} thumb");
        }
        self.state = DragState::Idle;
    }

    /// Cancels the gesture. Same as [`DragController::pointer_up`]: there is
    /// no revert.
    pub fn cancel(&mut self) {
        self.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::model::TrackGeometry;

    /// 0..100 on a 500 px track: 25 px thumbs, gap of 5, and 475 px of
    /// pointer travel across the whole range.
    fn model() -> RangeModel {
        RangeModel::new(0.0, 100.0)
            .unwrap()
            .with_geometry(TrackGeometry {
                length: 500.0,
                ..Default::default()
            })
            .with_values(20.0, 80.0)
    }

    fn pixels_for_value(value: f64) -> f32 {
        (value * 475.0 / 100.0) as f32
    }

    fn thumb_center(model: &RangeModel, thumb: Thumb) -> Vec2 {
        model.thumb_rect(thumb).center()
    }

    #[test]
    fn pointer_down_on_lower_thumb_claims_it() {
        let model = model();
        let mut controller = DragController::new();
        assert!(controller.pointer_down(&model, thumb_center(&model, Thumb::Lower)));
        assert_eq!(controller.state(), DragState::DraggingLower);
        assert_eq!(controller.active_thumb(), Some(Thumb::Lower));
    }

    #[test]
    fn pointer_down_on_track_band_under_upper_thumb_claims_it() {
        let model = model();
        let mut controller = DragController::new();
        let x = model.position_for_value(80.0);
        let y = model.track_rect().center().y;
        assert!(controller.pointer_down(&model, Vec2::new(x, y)));
        assert_eq!(controller.state(), DragState::DraggingUpper);
    }

    #[test]
    fn pointer_down_outside_thumbs_is_not_claimed() {
        let mut model = model();
        let mut controller = DragController::new();
        let between = Vec2::new(model.position_for_value(50.0), thumb_center(&model, Thumb::Lower).y);
        assert!(!controller.pointer_down(&model, between));
        assert_eq!(controller.state(), DragState::Idle);

        assert_eq!(controller.pointer_move(&mut model, between + Vec2::X * 40.0), None);
        assert_eq!(model.lower_value(), 20.0);
        assert_eq!(model.upper_value(), 80.0);
    }

    #[test]
    fn lower_thumb_wins_when_thumbs_overlap() {
        let model = model().with_values(50.0, 50.0);
        let mut controller = DragController::new();
        assert_eq!(model.lower_value() + model.minimum_gap_value(), model.upper_value());
        let overlap = Vec2::new(
            model.thumb_rect(Thumb::Upper).min.x + 1.0,
            thumb_center(&model, Thumb::Upper).y,
        );
        assert!(model.hit_rect(Thumb::Lower).contains(overlap));
        assert!(controller.pointer_down(&model, overlap));
        assert_eq!(controller.active_thumb(), Some(Thumb::Lower));
    }

    #[test]
    fn drag_moves_lower_by_pixel_delta() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);

        let change = controller
            .pointer_move(&mut model, start + Vec2::X * pixels_for_value(10.0))
            .unwrap();
        assert!((change.lower - 30.0).abs() < 1e-3);
        assert_eq!(change.upper, 80.0);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Upper);
        controller.pointer_down(&model, start);

        let step = pixels_for_value(5.0);
        controller.pointer_move(&mut model, start - Vec2::X * step);
        controller.pointer_move(&mut model, start - Vec2::X * step * 2.0);
        assert!((model.upper_value() - 70.0).abs() < 1e-3);
        assert_eq!(controller.last_pointer_position(), start - Vec2::X * step * 2.0);
    }

    #[test]
    fn dragging_lower_past_upper_saturates_at_gap() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);

        let change = controller
            .pointer_move(&mut model, start + Vec2::X * pixels_for_value(90.0))
            .unwrap();
        assert!((change.lower - 75.0).abs() < 1e-6);
        assert_eq!(change.upper, 80.0);
    }

    #[test]
    fn dragging_upper_past_maximum_saturates() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Upper);
        controller.pointer_down(&model, start);

        let change = controller
            .pointer_move(&mut model, start + Vec2::X * 1_000.0)
            .unwrap();
        assert_eq!(change.upper, 100.0);
        assert_eq!(change.lower, 20.0);
    }

    #[test]
    fn every_move_step_notifies_even_when_saturated() {
        let mut model = model().with_values(0.0, 80.0);
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);

        let change = controller.pointer_move(&mut model, start - Vec2::X * 30.0);
        assert_eq!(change, Some(RangeChanged { lower: 0.0, upper: 80.0 }));
    }

    #[test]
    fn vertical_movement_does_not_change_values() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);
        controller.pointer_move(&mut model, start + Vec2::Y * 200.0);
        assert_eq!(model.lower_value(), 20.0);
    }

    #[test]
    fn release_and_cancel_keep_values_and_reset_state() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);

        controller.pointer_down(&model, start);
        controller.pointer_move(&mut model, start + Vec2::X * pixels_for_value(10.0));
        controller.cancel();
        assert_eq!(controller.state(), DragState::Idle);
        assert!((model.lower_value() - 30.0).abs() < 1e-3);

        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);
        controller.pointer_move(&mut model, start + Vec2::X * pixels_for_value(10.0));
        controller.pointer_up();
        assert!(!controller.is_dragging());
        assert!((model.lower_value() - 40.0).abs() < 1e-3);

        assert_eq!(controller.pointer_move(&mut model, start), None);
    }

    #[test]
    fn degenerate_track_yields_zero_delta() {
        let mut model = model();
        let mut controller = DragController::new();
        let start = thumb_center(&model, Thumb::Lower);
        controller.pointer_down(&model, start);
        model.set_minimum_gap(Some(5.0));
        model.set_track_geometry(20.0, 25.0);
        controller.pointer_move(&mut model, start + Vec2::X * 50.0);
        assert_eq!(model.lower_value(), 20.0);
    }
}
