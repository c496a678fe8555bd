//! Renderer contract.
//!
//! The renderer owns everything visual: widget state, layout and drawing.
//! The controller only drives it - one call per accepted event, followed by
//! a repaint - and treats the first `Some` it returns as the result of the
//! whole interaction.

use embassy_time::{Duration, Instant};

use crate::input::ButtonEvent;
use crate::timer::{Timer, TimerToken};

/// Capability handed to the renderer on every callback.
///
/// This is how a renderer asks to be woken up later: the request goes to
/// the controller's single [`Timer`], replacing any earlier request.
pub struct EventCtx<'a> {
    timer: &'a Timer,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(timer: &'a Timer) -> Self {
        Self { timer }
    }

    /// Wake the renderer at `deadline` with `token`.
    pub fn request_timer(&mut self, token: TimerToken, deadline: Instant) {
        self.timer.schedule(deadline, token);
    }

    /// Wake the renderer `delay` from now with `token`.
    pub fn request_timer_after(&mut self, token: TimerToken, delay: Duration) {
        self.timer.schedule_after(delay, token);
    }

    /// Forget any outstanding wake-up request.
    pub fn cancel_timer(&mut self) {
        self.timer.cancel();
    }
}

pub trait Renderer {
    /// Terminal value of an interaction.
    type Msg;

    /// Called once before the first paint. Renderers that animate or time
    /// out arm their first timer here.
    fn attach(&mut self, _ctx: &mut EventCtx<'_>) {}

    /// Blank the display ahead of the initial paint.
    fn clear(&mut self) {}

    /// Redraw the current state. Idempotent.
    fn paint(&mut self);

    fn button_event(&mut self, ctx: &mut EventCtx<'_>, event: ButtonEvent) -> Option<Self::Msg>;

    fn timer_event(&mut self, ctx: &mut EventCtx<'_>, token: TimerToken) -> Option<Self::Msg>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Msg = R::Msg;

    fn attach(&mut self, ctx: &mut EventCtx<'_>) {
        (**self).attach(ctx)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn paint(&mut self) {
        (**self).paint()
    }

    fn button_event(&mut self, ctx: &mut EventCtx<'_>, event: ButtonEvent) -> Option<Self::Msg> {
        (**self).button_event(ctx, event)
    }

    fn timer_event(&mut self, ctx: &mut EventCtx<'_>, token: TimerToken) -> Option<Self::Msg> {
        (**self).timer_event(ctx, token)
    }
}
