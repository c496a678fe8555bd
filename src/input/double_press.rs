//! Double-press disambiguation.
//!
//! Two independent switches produce independent edges. Holding both
//! together is reported as the MIDDLE control instead:
//!
//! ```text
//! raw:        P(L)   P(R)      R(L)   R(R)
//! effective:  P(L)   P(MIDDLE)  -     R(MIDDLE)
//! ```
//!
//! The first button to be let go is swallowed (it is half of the gesture,
//! not a click); the second one resolves to the MIDDLE release.

use super::{ButtonEvent, ButtonEventKind, ButtonId};

/// State machine tracking both switches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DoublePressHandler {
    left_down: bool,
    right_down: bool,
    /// A MIDDLE press was dispatched and its release is still owed.
    awaiting_double_release: bool,
    pending_double_press: bool,
    /// Only meaningful while `awaiting_double_release` is set.
    pending_double_release: bool,
    suppress_next: bool,
}

impl DoublePressHandler {
    pub const fn new() -> Self {
        Self {
            left_down: false,
            right_down: false,
            awaiting_double_release: false,
            pending_double_press: false,
            pending_double_release: false,
            suppress_next: false,
        }
    }

    /// Feed one raw edge. MIDDLE edges are ignored.
    pub fn handle(&mut self, kind: ButtonEventKind, button: ButtonId) {
        let Some(other) = button.opposite() else {
            return;
        };

        match kind {
            ButtonEventKind::Pressed => {
                self.suppress_next = false;
                self.set_down(button, true);
                if self.is_down(other) {
                    self.pending_double_press = true;
                }
            }
            ButtonEventKind::Released => {
                if !self.is_down(button) {
                    warn!("double press: release without press: {}", button);
                    return;
                }
                self.suppress_next = false;
                self.set_down(button, false);
                if self.is_down(other) {
                    // First half of a double-press teardown.
                    self.suppress_next = true;
                } else {
                    self.pending_double_release = true;
                }
            }
        }
    }

    /// The edge just handled must not reach the renderer at all.
    pub fn should_skip_rest(&self) -> bool {
        self.suppress_next
    }

    pub fn should_send_double_press_pressed(&self) -> bool {
        self.pending_double_press
    }

    pub fn should_send_double_press_released(&self) -> bool {
        self.awaiting_double_release && self.pending_double_release
    }

    pub fn account_for_double_press_pressed(&mut self) {
        self.awaiting_double_release = true;
        self.pending_double_press = false;
    }

    pub fn account_for_double_press_released(&mut self) {
        self.pending_double_release = false;
        self.awaiting_double_release = false;
    }

    /// Full pipeline for one raw edge: returns the event to dispatch, or
    /// `None` when the edge is absorbed.
    pub fn resolve(&mut self, raw: ButtonEvent) -> Option<ButtonEvent> {
        if raw.button == ButtonId::Middle {
            warn!("double press: dropping raw middle edge");
            return None;
        }

        self.handle(raw.kind, raw.button);
        if self.should_skip_rest() {
            trace!("double press: suppressed {}", raw);
            return None;
        }

        if self.should_send_double_press_pressed() {
            self.account_for_double_press_pressed();
            Some(ButtonEvent::pressed(ButtonId::Middle))
        } else if self.should_send_double_press_released() {
            self.account_for_double_press_released();
            Some(ButtonEvent::released(ButtonId::Middle))
        } else {
            Some(raw)
        }
    }

    fn is_down(&self, button: ButtonId) -> bool {
        match button {
            ButtonId::Left => self.left_down,
            ButtonId::Right => self.right_down,
            ButtonId::Middle => false,
        }
    }

    fn set_down(&mut self, button: ButtonId, down: bool) {
        match button {
            ButtonId::Left => self.left_down = down,
            ButtonId::Right => self.right_down = down,
            ButtonId::Middle => {}
        }
    }
}
