//! User-activity tracking.
//!
//! The controller reports every accepted button edge to an [`IdleTouch`]
//! collaborator. Firmware passes a shared [`IdleTimer`], which drives the
//! screen auto-off policy and lets the main loop abandon an interaction
//! nobody is looking at.

use core::cell::Cell;

use embassy_time::{Duration, Instant};

use crate::config;

/// Receives a notification for each accepted input event.
pub trait IdleTouch {
    fn touch(&mut self);
}

/// Activity sink that discards notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIdle;

impl IdleTouch for NoIdle {
    fn touch(&mut self) {}
}

impl<T: IdleTouch + ?Sized> IdleTouch for &mut T {
    fn touch(&mut self) {
        (**self).touch()
    }
}

/// Last-activity clock with an inactivity timeout.
///
/// Touched through a shared reference so the controller and an idle watcher
/// on the same executor can both hold it.
pub struct IdleTimer {
    last_activity: Cell<Instant>,
    timeout: Duration,
    auto_off_enabled: bool,
}

impl IdleTimer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            last_activity: Cell::new(Instant::now()),
            timeout,
            auto_off_enabled: true,
        }
    }

    /// Timer configured from the compile-time screen auto-off settings.
    pub fn from_config() -> Self {
        Self {
            auto_off_enabled: config::SCREEN_AUTO_OFF_ENABLED,
            ..Self::new(Duration::from_secs(config::SCREEN_AUTO_OFF_TIMEOUT_SECS))
        }
    }

    /// Record activity.
    pub fn touch(&self) {
        self.last_activity.set(Instant::now());
    }

    pub fn last_activity(&self) -> Instant {
        self.last_activity.get()
    }

    pub fn idle_for(&self) -> Duration {
        self.last_activity.get().elapsed()
    }

    pub fn is_idle(&self) -> bool {
        self.auto_off_enabled && self.idle_for() >= self.timeout
    }

    /// Whether the display should be powered, given its base state.
    pub fn screen_on(&self, base_display_on: bool) -> bool {
        screen_should_be_on(
            base_display_on,
            self.auto_off_enabled,
            self.idle_for(),
            self.timeout,
        )
    }

    /// Resolve once the timeout elapses without a touch.
    ///
    /// Never resolves when auto-off is disabled.
    pub async fn wait_idle(&self) {
        if !self.auto_off_enabled {
            core::future::pending::<()>().await;
        }
        loop {
            let Some(deadline) = self.last_activity.get().checked_add(self.timeout) else {
                return core::future::pending().await;
            };
            embassy_time::Timer::at(deadline).await;
            if self.is_idle() {
                debug!("idle: no input for {} ms", self.idle_for().as_millis());
                return;
            }
        }
    }
}

impl IdleTouch for IdleTimer {
    fn touch(&mut self) {
        IdleTimer::touch(self)
    }
}

impl IdleTouch for &IdleTimer {
    fn touch(&mut self) {
        IdleTimer::touch(self)
    }
}

/// Decide whether screen should be on based on base power state and inactivity policy.
pub fn screen_should_be_on(
    base_display_on: bool,
    auto_off_enabled: bool,
    idle: Duration,
    auto_off_timeout: Duration,
) -> bool {
    if !base_display_on {
        return false;
    }

    if auto_off_enabled && idle >= auto_off_timeout {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{select, Either};

    #[test]
    fn screen_power_policy_auto_off_enabled_after_timeout() {
        let timeout = Duration::from_secs(120);
        assert!(screen_should_be_on(true, true, Duration::from_secs(119), timeout));
        assert!(!screen_should_be_on(true, true, Duration::from_secs(120), timeout));
        assert!(!screen_should_be_on(true, true, Duration::from_secs(240), timeout));
    }

    #[test]
    fn screen_power_policy_auto_off_disabled_stays_on() {
        let timeout = Duration::from_secs(120);
        assert!(screen_should_be_on(true, false, Duration::from_secs(120), timeout));
        assert!(screen_should_be_on(true, false, Duration::from_secs(3600), timeout));
    }

    #[test]
    fn screen_power_policy_respects_base_display_state() {
        let timeout = Duration::from_secs(120);
        assert!(!screen_should_be_on(false, true, Duration::from_secs(0), timeout));
        assert!(!screen_should_be_on(false, false, Duration::from_secs(999), timeout));
    }

    #[test]
    fn touch_resets_idle_clock() {
        let idle = IdleTimer::new(Duration::from_millis(10));
        block_on(embassy_time::Timer::after_millis(15));
        assert!(idle.is_idle());
        assert!(!idle.screen_on(true));

        idle.touch();
        assert!(!idle.is_idle());
        assert!(idle.screen_on(true));
    }

    #[test]
    fn huge_timeout_never_goes_idle() {
        let idle = IdleTimer::new(Duration::MAX);
        let outcome = block_on(select(idle.wait_idle(), embassy_time::Timer::after_millis(10)));
        assert!(matches!(outcome, Either::Second(())));
        assert!(idle.screen_on(true));
    }

    #[test]
    fn wait_idle_follows_touches() {
        let idle = IdleTimer::new(Duration::from_millis(20));
        let start = Instant::now();
        block_on(async {
            embassy_time::Timer::after_millis(10).await;
            idle.touch();
            idle.wait_idle().await;
        });
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(idle.is_idle());
    }
}
