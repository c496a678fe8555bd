//! Layout controller - runs one screen interaction to its result.
//!
//! Two cooperative tasks share the renderer:
//!
//! - **input**: raw edge → [`DoublePressHandler`] → `button_event` → paint
//! - **timers**: timer token → `timer_event` → paint
//!
//! They are raced with [`select`]; the first renderer result ends the
//! interaction and the other task is dropped at its suspension point. Each
//! renderer callback runs to completion before either task awaits again, so
//! the losing task never leaves a half-applied event behind.
//!
//! Nothing is allocated: both tasks live inside the future returned by
//! [`LayoutController::run`].

use core::cell::RefCell;

use embassy_futures::select::{select, Either};

use crate::idle::{IdleTouch, NoIdle};
use crate::input::{ButtonSource, DoublePressHandler};
use crate::renderer::{EventCtx, Renderer};
use crate::timer::Timer;

pub struct LayoutController<R, S, I = NoIdle> {
    renderer: R,
    input: S,
    idle: I,
    timer: Timer,
    double_press: DoublePressHandler,
}

impl<R, S> LayoutController<R, S, NoIdle>
where
    R: Renderer,
    S: ButtonSource,
{
    pub fn new(renderer: R, input: S) -> Self {
        Self {
            renderer,
            input,
            idle: NoIdle,
            timer: Timer::new(),
            double_press: DoublePressHandler::new(),
        }
    }
}

impl<R, S, I> LayoutController<R, S, I>
where
    R: Renderer,
    S: ButtonSource,
    I: IdleTouch,
{
    /// Report every accepted input event to `idle`.
    pub fn with_idle<J: IdleTouch>(self, idle: J) -> LayoutController<R, S, J> {
        LayoutController {
            renderer: self.renderer,
            input: self.input,
            idle,
            timer: self.timer,
            double_press: self.double_press,
        }
    }

    /// Run the interaction and return its single result.
    ///
    /// Dropping the returned future cancels the interaction; no result is
    /// produced and the renderer stops being driven.
    pub async fn run(self) -> R::Msg {
        let Self {
            renderer,
            mut input,
            mut idle,
            timer,
            mut double_press,
        } = self;
        let renderer = RefCell::new(renderer);

        {
            let mut r = renderer.borrow_mut();
            r.attach(&mut EventCtx::new(&timer));
            r.clear();
            r.paint();
        }
        debug!("layout: running");

        let buttons = handle_input_and_rendering(
            &renderer,
            &timer,
            &mut input,
            &mut double_press,
            &mut idle,
        );
        let timers = handle_timers(&renderer, &timer);

        match select(buttons, timers).await {
            Either::First(msg) => {
                debug!("layout: finished by button");
                msg
            }
            Either::Second(msg) => {
                debug!("layout: finished by timer");
                msg
            }
        }
    }
}

async fn handle_input_and_rendering<R, S, I>(
    renderer: &RefCell<R>,
    timer: &Timer,
    input: &mut S,
    double_press: &mut DoublePressHandler,
    idle: &mut I,
) -> R::Msg
where
    R: Renderer,
    S: ButtonSource,
    I: IdleTouch,
{
    loop {
        let raw = input.next_event().await;
        let Some(event) = double_press.resolve(raw) else {
            continue;
        };

        idle.touch();
        trace!("layout: dispatch {}", event);

        let mut r = renderer.borrow_mut();
        let msg = r.button_event(&mut EventCtx::new(timer), event);
        r.paint();
        if let Some(msg) = msg {
            return msg;
        }
    }
}

async fn handle_timers<R: Renderer>(renderer: &RefCell<R>, timer: &Timer) -> R::Msg {
    loop {
        let token = timer.wait().await;
        trace!("layout: timer {}", token);

        let mut r = renderer.borrow_mut();
        let msg = r.timer_event(&mut EventCtx::new(timer), token);
        r.paint();
        if let Some(msg) = msg {
            return msg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonEvent, ButtonId, RawButtonEvent};
    use crate::timer::TimerToken;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use embassy_time::{Duration, Instant};
    use heapless::Vec;

    const P_L: ButtonEvent = ButtonEvent::pressed(ButtonId::Left);
    const R_L: ButtonEvent = ButtonEvent::released(ButtonId::Left);
    const P_R: ButtonEvent = ButtonEvent::pressed(ButtonId::Right);
    const R_R: ButtonEvent = ButtonEvent::released(ButtonId::Right);
    const P_M: ButtonEvent = ButtonEvent::pressed(ButtonId::Middle);
    const R_M: ButtonEvent = ButtonEvent::released(ButtonId::Middle);

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Dispatch {
        Button(ButtonEvent),
        Timer(TimerToken),
    }

    #[derive(Default)]
    struct Scripted {
        log: Vec<Dispatch, 16>,
        paints: usize,
        cleared: bool,
        attach_timer: Option<(TimerToken, Duration)>,
        attach_at: Option<(TimerToken, Instant)>,
        rearm_at: Option<(TimerToken, Instant)>,
        finish_on_token: Option<TimerToken>,
        finish_on: Option<ButtonEvent>,
        finish_on_timer: bool,
        timer_on: Option<(ButtonEvent, TimerToken, Duration)>,
    }

    impl Renderer for Scripted {
        type Msg = Dispatch;

        fn attach(&mut self, ctx: &mut EventCtx<'_>) {
            if let Some((token, delay)) = self.attach_timer {
                ctx.request_timer_after(token, delay);
            }
            if let Some((token, deadline)) = self.attach_at {
                ctx.request_timer(token, deadline);
            }
        }

        fn clear(&mut self) {
            self.cleared = true;
        }

        fn paint(&mut self) {
            self.paints += 1;
        }

        fn button_event(&mut self, ctx: &mut EventCtx<'_>, event: ButtonEvent) -> Option<Dispatch> {
            self.log.push(Dispatch::Button(event)).unwrap();
            if let Some((on, token, delay)) = self.timer_on {
                if on == event {
                    ctx.request_timer_after(token, delay);
                }
            }
            (self.finish_on == Some(event)).then_some(Dispatch::Button(event))
        }

        fn timer_event(&mut self, ctx: &mut EventCtx<'_>, token: TimerToken) -> Option<Dispatch> {
            self.log.push(Dispatch::Timer(token)).unwrap();
            if let Some((next, deadline)) = self.rearm_at.take() {
                ctx.request_timer(next, deadline);
            }
            let done = self.finish_on_timer || self.finish_on_token == Some(token);
            done.then_some(Dispatch::Timer(token))
        }
    }

    struct Touches(usize);

    impl IdleTouch for Touches {
        fn touch(&mut self) {
            self.0 += 1;
        }
    }

    fn feed(channel: &Channel<NoopRawMutex, RawButtonEvent, 8>, edges: &[RawButtonEvent]) {
        for &edge in edges {
            channel.try_send(edge).unwrap();
        }
    }

    #[test]
    fn paints_before_first_event() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L, R_L]);
        let mut renderer = Scripted {
            finish_on: Some(R_L),
            ..Default::default()
        };

        block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert!(renderer.cleared);
        // Initial paint plus one per dispatched event.
        assert_eq!(renderer.paints, 3);
    }

    #[test]
    fn double_press_dispatches_middle() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L, P_R, R_L, R_R]);
        let mut renderer = Scripted {
            finish_on: Some(R_M),
            ..Default::default()
        };

        let result = block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(result, Dispatch::Button(R_M));
        assert_eq!(
            renderer.log.as_slice(),
            &[
                Dispatch::Button(P_L),
                Dispatch::Button(P_M),
                Dispatch::Button(R_M)
            ]
        );
        // The suppressed release is not painted either.
        assert_eq!(renderer.paints, 4);
    }

    #[test]
    fn nothing_dispatched_after_result() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L, R_L, P_R, R_R]);
        let mut renderer = Scripted {
            finish_on: Some(R_L),
            ..Default::default()
        };

        block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(
            renderer.log.as_slice(),
            &[Dispatch::Button(P_L), Dispatch::Button(R_L)]
        );
        assert_eq!(channel.try_receive().ok(), Some(P_R));
    }

    #[test]
    fn early_result_beats_pending_timer() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L]);
        let mut renderer = Scripted {
            attach_timer: Some((TimerToken(9), Duration::from_secs(3600))),
            finish_on: Some(P_L),
            ..Default::default()
        };

        let start = Instant::now();
        let result = block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(result, Dispatch::Button(P_L));
        assert_eq!(renderer.log.as_slice(), &[Dispatch::Button(P_L)]);
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn timer_result_without_input() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        let mut renderer = Scripted {
            attach_timer: Some((TimerToken(4), Duration::from_millis(5))),
            finish_on_timer: true,
            ..Default::default()
        };

        let result = block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(result, Dispatch::Timer(TimerToken(4)));
        assert_eq!(renderer.paints, 2);
    }

    #[test]
    fn renderer_reschedule_replaces_pending_timer() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L]);
        let mut renderer = Scripted {
            attach_timer: Some((TimerToken(1), Duration::from_millis(20))),
            timer_on: Some((P_L, TimerToken(2), Duration::from_millis(40))),
            finish_on_timer: true,
            ..Default::default()
        };

        let result = block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(result, Dispatch::Timer(TimerToken(2)));
        assert_eq!(
            renderer.log.as_slice(),
            &[Dispatch::Button(P_L), Dispatch::Timer(TimerToken(2))]
        );
    }

    #[test]
    fn absolute_deadline_rearmed_from_timer_event() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        let start = Instant::now();
        let mut renderer = Scripted {
            attach_at: Some((TimerToken(5), start + Duration::from_millis(5))),
            rearm_at: Some((TimerToken(6), start + Duration::from_millis(15))),
            finish_on_token: Some(TimerToken(6)),
            ..Default::default()
        };

        let result = block_on(LayoutController::new(&mut renderer, channel.receiver()).run());
        assert_eq!(result, Dispatch::Timer(TimerToken(6)));
        // Each armed deadline is delivered exactly once.
        assert_eq!(
            renderer.log.as_slice(),
            &[Dispatch::Timer(TimerToken(5)), Dispatch::Timer(TimerToken(6))]
        );
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn idle_touched_per_accepted_event() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        feed(&channel, &[P_L, P_R, R_L, R_R]);
        let mut renderer = Scripted {
            finish_on: Some(R_M),
            ..Default::default()
        };
        let mut touches = Touches(0);

        block_on(
            LayoutController::new(&mut renderer, channel.receiver())
                .with_idle(&mut touches)
                .run(),
        );
        assert_eq!(touches.0, 3);
    }

    #[test]
    fn dropping_run_cancels_interaction() {
        let channel = Channel::<NoopRawMutex, RawButtonEvent, 8>::new();
        let mut renderer = Scripted::default();

        let outcome = block_on(select(
            LayoutController::new(&mut renderer, channel.receiver()).run(),
            embassy_time::Timer::after_millis(10),
        ));
        assert!(matches!(outcome, Either::Second(())));
        assert!(renderer.log.is_empty());
        assert_eq!(renderer.paints, 1);
    }
}
