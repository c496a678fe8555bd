//! Three-way confirmation dialog.
//!
//! LEFT cancels, RIGHT confirms, MIDDLE (both buttons) asks for more info
//! when the dialog offers it. A control only resolves on release, and only
//! if the same control was the one pressed. An optional countdown cancels
//! the dialog when nobody answers.

use embassy_time::Duration;
use heapless::String;

use crate::config::{ACTION_MAX_LEN, COUNTDOWN_TICK_MS, LABEL_MAX_LEN, TITLE_MAX_LEN};
use crate::input::{ButtonEvent, ButtonEventKind, ButtonId};
use crate::renderer::{EventCtx, Renderer};
use crate::timer::TimerToken;

/// Token of the countdown tick.
pub const COUNTDOWN_TOKEN: TimerToken = TimerToken(1);

/// Outcome of a confirmation dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfirmResult {
    Confirmed,
    Cancelled,
    Info,
}

/// Everything a canvas needs to draw the dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DialogView<'a> {
    pub title: &'a str,
    pub action: &'a str,
    pub cancel_label: &'a str,
    pub confirm_label: &'a str,
    pub info_label: Option<&'a str>,
    /// Control currently held down.
    pub highlighted: Option<ButtonId>,
    /// Seconds left before auto-cancel.
    pub countdown: Option<u32>,
}

/// Drawing backend for [`ConfirmDialog`].
pub trait Canvas {
    fn clear(&mut self);
    fn draw_dialog(&mut self, view: &DialogView<'_>);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn draw_dialog(&mut self, view: &DialogView<'_>) {
        (**self).draw_dialog(view)
    }
}

pub struct ConfirmDialog<C> {
    canvas: C,
    title: String<TITLE_MAX_LEN>,
    action: String<ACTION_MAX_LEN>,
    cancel_label: String<LABEL_MAX_LEN>,
    confirm_label: String<LABEL_MAX_LEN>,
    info_label: Option<String<LABEL_MAX_LEN>>,
    held: Option<ButtonId>,
    remaining: Option<u32>,
    tick: Duration,
}

impl<C: Canvas> ConfirmDialog<C> {
    pub fn new(canvas: C, title: &str, action: &str) -> Self {
        Self {
            canvas,
            title: truncated(title),
            action: truncated(action),
            cancel_label: truncated("CANCEL"),
            confirm_label: truncated("CONFIRM"),
            info_label: None,
            held: None,
            remaining: None,
            tick: Duration::from_millis(COUNTDOWN_TICK_MS),
        }
    }

    pub fn with_labels(mut self, cancel: &str, confirm: &str) -> Self {
        self.cancel_label = truncated(cancel);
        self.confirm_label = truncated(confirm);
        self
    }

    /// Offer the MIDDLE control, resolving to [`ConfirmResult::Info`].
    pub fn with_info(mut self, label: &str) -> Self {
        self.info_label = Some(truncated(label));
        self
    }

    /// Cancel automatically after `ticks` countdown ticks.
    pub fn with_countdown(mut self, ticks: u32) -> Self {
        self.remaining = Some(ticks);
        self
    }

    /// Length of one countdown tick.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn view(&self) -> DialogView<'_> {
        DialogView {
            title: &self.title,
            action: &self.action,
            cancel_label: &self.cancel_label,
            confirm_label: &self.confirm_label,
            info_label: self.info_label.as_deref(),
            highlighted: self.held,
            countdown: self.remaining,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    fn accepts(&self, button: ButtonId) -> bool {
        button != ButtonId::Middle || self.info_label.is_some()
    }
}

impl<C: Canvas> Renderer for ConfirmDialog<C> {
    type Msg = ConfirmResult;

    fn attach(&mut self, ctx: &mut EventCtx<'_>) {
        if self.remaining.is_some() {
            ctx.request_timer_after(COUNTDOWN_TOKEN, self.tick);
        }
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn paint(&mut self) {
        let view = DialogView {
            title: &self.title,
            action: &self.action,
            cancel_label: &self.cancel_label,
            confirm_label: &self.confirm_label,
            info_label: self.info_label.as_deref(),
            highlighted: self.held,
            countdown: self.remaining,
        };
        self.canvas.draw_dialog(&view);
    }

    fn button_event(&mut self, ctx: &mut EventCtx<'_>, event: ButtonEvent) -> Option<ConfirmResult> {
        if !self.accepts(event.button) {
            self.held = None;
            return None;
        }

        match event.kind {
            ButtonEventKind::Pressed => {
                self.held = Some(event.button);
                None
            }
            ButtonEventKind::Released => {
                if self.held.take() != Some(event.button) {
                    return None;
                }
                ctx.cancel_timer();
                Some(match event.button {
                    ButtonId::Left => ConfirmResult::Cancelled,
                    ButtonId::Right => ConfirmResult::Confirmed,
                    ButtonId::Middle => ConfirmResult::Info,
                })
            }
        }
    }

    fn timer_event(&mut self, ctx: &mut EventCtx<'_>, token: TimerToken) -> Option<ConfirmResult> {
        if token != COUNTDOWN_TOKEN {
            return None;
        }
        let remaining = self.remaining?.saturating_sub(1);
        self.remaining = Some(remaining);

        if remaining == 0 {
            return Some(ConfirmResult::Cancelled);
        }
        ctx.request_timer_after(COUNTDOWN_TOKEN, self.tick);
        None
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
