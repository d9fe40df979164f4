//! Vertical drag gesture state machine.
//!
//! Two states: [`GestureState::Idle`] and [`GestureState::Dragging`]. The
//! tracker only turns pointer coordinates into value deltas; applying and
//! clamping the delta is the controller's job.

use super::constants::DRAG_SENSITIVITY;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        last_y: f32,
    },
}

#[derive(Clone, Copy, Debug)]
pub struct GestureTracker {
    state: GestureState,
    sensitivity: f32,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(DRAG_SENSITIVITY)
    }
}

impl GestureTracker {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            state: GestureState::Idle,
            sensitivity,
        }
    }

    #[inline]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging { .. })
    }

    #[inline]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Idle -> Dragging. Returns true when a new gesture begins; a second
    /// press during a drag only moves the anchor.
    pub fn pointer_down(&mut self, y: f32) -> bool {
        let began = !self.is_dragging();
        self.state = GestureState::Dragging { last_y: y };
        began
    }

    /// Dragging self-loop. Upward motion (smaller y) yields a positive delta
    /// in value units. Moves while idle are ignored.
    pub fn pointer_move(&mut self, y: f32) -> Option<f32> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { last_y } => {
                let delta_y = last_y - y;
                self.state = GestureState::Dragging { last_y: y };
                Some(delta_y * self.sensitivity)
            }
        }
    }

    /// Dragging -> Idle. Returns true when a gesture actually ended.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.is_dragging();
        self.state = GestureState::Idle;
        ended
    }
}
