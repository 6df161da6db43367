//! The drag-interaction state machine.
//!
//! Idle, Dragging (button down, still eligible as a click) and
//! Scrubbing (past the movement threshold) map onto `drag` being
//! `None`, `Some { pending: true }` and `Some { pending: false }`.
//! Hover is orthogonal and only affects the palette.

use scrub_core::{Modifiers, Vec2};

use crate::config::VisualState;
use crate::range::ValueRange;

/// A press below this L1 distance still counts as a click.
pub const DRAG_THRESHOLD_PX: f32 = 3.0;

/// Live drag bookkeeping. `anchor`/`anchor_value` are snapshots from
/// button-down; every delta is computed against them, never
/// incrementally.
#[derive(Clone, Copy, Debug)]
pub struct DragSession {
    pub anchor: Vec2,
    pub anchor_value: f64,
    pub pending: bool,
}

#[derive(Default)]
pub struct InteractionController {
    drag: Option<DragSession>,
    hover: bool,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_drag(&mut self, anchor: Vec2, anchor_value: f64) {
        self.drag = Some(DragSession {
            anchor,
            anchor_value,
            pending: true,
        });
    }

    /// The pending-click timer and threshold crossing both land here;
    /// once cleared, release no longer opens the editor.
    pub fn clear_pending(&mut self) {
        if let Some(drag) = &mut self.drag {
            drag.pending = false;
        }
    }

    /// Ends the drag. Returns true when the press never stopped being a
    /// click (so release should open the inline editor).
    pub fn end_drag(&mut self) -> bool {
        self.drag.take().is_some_and(|d| d.pending)
    }

    /// Feed a pointer move. Below the threshold while still pending the
    /// move is swallowed; otherwise returns the scrub target value,
    /// recomputed from the original anchor.
    pub fn pointer_moved(
        &mut self,
        pos: Vec2,
        modifiers: &Modifiers,
        range: &ValueRange,
    ) -> Option<f64> {
        let drag = self.drag.as_mut()?;
        if drag.pending {
            if pos.l1_distance(drag.anchor) < DRAG_THRESHOLD_PX {
                return None;
            }
            drag.pending = false;
        }
        let dx = pos.x - drag.anchor.x;
        let dy = pos.y - drag.anchor.y;
        // Dominant axis: horizontal wins ties; vertical is inverted so
        // dragging up increases the value.
        let delta = if dx.abs() > dy.abs() { dx } else { -dy };
        Some(scrub_target(
            drag.anchor_value,
            delta as f64,
            modifiers,
            range,
        ))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.drag.is_some_and(|d| d.pending)
    }

    pub fn set_hover(&mut self, hover: bool) {
        self.hover = hover;
    }

    pub fn hovering(&self) -> bool {
        self.hover
    }

    pub fn visual_state(&self) -> VisualState {
        if self.drag.is_some() {
            VisualState::Active
        } else if self.hover {
            VisualState::Hover
        } else {
            VisualState::Normal
        }
    }
}

/// Map a drag delta to a target value. Shift coarsens (increment x10,
/// and 7 pixels per step instead of 3); ctrl refines (increment /10).
pub fn scrub_target(
    anchor_value: f64,
    delta: f64,
    modifiers: &Modifiers,
    range: &ValueRange,
) -> f64 {
    let mut increment = range.increment;
    let mut divisor = 3.0;
    if modifiers.shift {
        increment *= 10.0;
        divisor = 7.0;
    } else if modifiers.ctrl {
        increment /= 10.0;
    }
    range.clamp(anchor_value + (delta / divisor) * increment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_0_100() -> ValueRange {
        ValueRange::resolve(Some(0.0), Some(100.0), 0.0, false)
    }

    fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        }
    }

    #[test]
    fn below_threshold_is_swallowed_and_stays_pending() {
        let mut c = InteractionController::new();
        c.begin_drag(Vec2::new(10.0, 10.0), 50.0);
        assert_eq!(
            c.pointer_moved(Vec2::new(11.0, 11.0), &Modifiers::NONE, &range_0_100()),
            None
        );
        assert!(c.is_pending());
        assert!(c.end_drag());
    }

    #[test]
    fn crossing_threshold_scrubs_and_clears_pending() {
        let mut c = InteractionController::new();
        let r = range_0_100();
        c.begin_drag(Vec2::new(0.0, 0.0), 50.0);
        // |dx|+|dy| = 3 meets the threshold exactly
        assert_eq!(
            c.pointer_moved(Vec2::new(2.0, -1.0), &Modifiers::NONE, &r),
            Some(50.0 + (2.0 / 3.0))
        );
        assert!(!c.is_pending());
        // once scrubbing, even a one-pixel move recomputes from anchor
        assert_eq!(
            c.pointer_moved(Vec2::new(1.0, 0.0), &Modifiers::NONE, &r),
            Some(50.0 + (1.0 / 3.0))
        );
        assert!(!c.end_drag());
    }

    #[test]
    fn deltas_are_anchored_not_incremental() {
        let mut c = InteractionController::new();
        let r = range_0_100();
        c.begin_drag(Vec2::new(0.0, 0.0), 50.0);
        assert_eq!(
            c.pointer_moved(Vec2::new(30.0, 0.0), &Modifiers::NONE, &r),
            Some(60.0)
        );
        // moving back toward the anchor lowers the value again
        assert_eq!(
            c.pointer_moved(Vec2::new(15.0, 0.0), &Modifiers::NONE, &r),
            Some(55.0)
        );
    }

    #[test]
    fn dominant_axis_picks_larger_magnitude() {
        let mut c = InteractionController::new();
        let r = range_0_100();
        c.begin_drag(Vec2::new(0.0, 0.0), 50.0);
        // vertical dominates; up is positive
        assert_eq!(
            c.pointer_moved(Vec2::new(3.0, -9.0), &Modifiers::NONE, &r),
            Some(53.0)
        );
        // horizontal dominates
        assert_eq!(
            c.pointer_moved(Vec2::new(9.0, 3.0), &Modifiers::NONE, &r),
            Some(53.0)
        );
        // tie goes to the vertical branch (|dx| > |dy| is strict)
        assert_eq!(
            c.pointer_moved(Vec2::new(6.0, 6.0), &Modifiers::NONE, &r),
            Some(48.0)
        );
    }

    #[test]
    fn shift_coarsens_ctrl_refines() {
        let r = range_0_100();
        // unmodified: 30px / 3 * 1 = +10
        assert_eq!(scrub_target(50.0, 30.0, &Modifiers::NONE, &r), 60.0);
        // shift: 21px / 7 * 10 = +30
        assert_eq!(scrub_target(50.0, 21.0, &shift(), &r), 80.0);
        // ctrl: 30px / 3 * 0.1 = +1
        assert!((scrub_target(50.0, 30.0, &ctrl(), &r) - 51.0).abs() < 1e-9);
    }

    #[test]
    fn scrub_target_clamps() {
        let r = range_0_100();
        assert_eq!(scrub_target(95.0, 30.0, &Modifiers::NONE, &r), 100.0);
        assert_eq!(scrub_target(5.0, -30.0, &Modifiers::NONE, &r), 0.0);
    }

    #[test]
    fn timer_clears_pending_so_release_is_not_a_click() {
        let mut c = InteractionController::new();
        c.begin_drag(Vec2::new(0.0, 0.0), 50.0);
        c.clear_pending();
        assert!(!c.end_drag());
    }

    #[test]
    fn visual_state_tracks_drag_then_hover() {
        let mut c = InteractionController::new();
        assert_eq!(c.visual_state(), VisualState::Normal);
        c.set_hover(true);
        assert_eq!(c.visual_state(), VisualState::Hover);
        c.begin_drag(Vec2::new(0.0, 0.0), 0.0);
        assert_eq!(c.visual_state(), VisualState::Active);
        c.end_drag();
        assert_eq!(c.visual_state(), VisualState::Hover);
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut c = InteractionController::new();
        assert_eq!(
            c.pointer_moved(Vec2::new(100.0, 100.0), &Modifiers::NONE, &range_0_100()),
            None
        );
        assert!(!c.end_drag());
    }
}
