//! Single-slot, re-armable deadline.
//!
//! A [`Timer`] holds at most one pending [`TimerEntry`]. Scheduling always
//! replaces whatever was armed before, so a waiter only ever sees the token
//! of the most recent request. Firing hands the token out once and leaves
//! the timer disarmed.
//!
//! The timer is shared by reference between the renderer (which arms it
//! through [`crate::renderer::EventCtx`]) and the controller's timer task
//! (which waits on it). Both run on the same executor, so the slot is a
//! plain `Cell` and the wake-up on re-arm is a no-op-mutex `Signal`.

use core::cell::Cell;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};

/// Opaque tag correlating a wake-up with the reason it was requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerToken(pub u32);

/// One armed deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerEntry {
    pub token: TimerToken,
    pub deadline: Instant,
}

pub struct Timer {
    entry: Cell<Option<TimerEntry>>,
    rearmed: Signal<NoopRawMutex, ()>,
}

impl Timer {
    pub const fn new() -> Self {
        Self {
            entry: Cell::new(None),
            rearmed: Signal::new(),
        }
    }

    /// Arm the timer, replacing any pending deadline regardless of token.
    pub fn schedule(&self, deadline: Instant, token: TimerToken) {
        if let Some(prev) = self.entry.replace(Some(TimerEntry { token, deadline })) {
            trace!("timer: {} replaced by {}", prev.token, token);
        }
        self.rearmed.signal(());
    }

    /// Arm the timer `delay` from now. A delay past the end of the clock
    /// arms at [`Instant::MAX`], which never fires.
    pub fn schedule_after(&self, delay: Duration, token: TimerToken) {
        let deadline = Instant::now().checked_add(delay).unwrap_or(Instant::MAX);
        self.schedule(deadline, token);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&self) {
        if self.entry.take().is_some() {
            self.rearmed.signal(());
        }
    }

    pub fn pending(&self) -> Option<TimerEntry> {
        self.entry.get()
    }

    pub fn is_armed(&self) -> bool {
        self.entry.get().is_some()
    }

    /// Wait for the armed deadline and return its token.
    ///
    /// Suspends while disarmed. A re-arm during the wait restarts it against
    /// the new deadline. Cancel-safe: dropping the future leaves the entry
    /// armed.
    pub async fn wait(&self) -> TimerToken {
        loop {
            let Some(entry) = self.entry.get() else {
                self.rearmed.wait().await;
                continue;
            };

            match select(embassy_time::Timer::at(entry.deadline), self.rearmed.wait()).await {
                Either::First(()) => {
                    if self.entry.get() == Some(entry) {
                        self.entry.set(None);
                        trace!("timer: fired {}", entry.token);
                        return entry.token;
                    }
                }
                Either::Second(()) => {}
            }
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
