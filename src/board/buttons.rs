//! GPIO button input with async debouncing.
//!
//! Two physical buttons (active-low with internal pull-up):
//!   - LEFT
//!   - RIGHT
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and sends a raw `ButtonEvent` edge (pressed *and*
//! released) to the layout channel. Combining the two buttons into the
//! MIDDLE control happens later, in the layout controller.

use confirm_ui::config::{BUTTON_DEBOUNCE_MS, INPUT_QUEUE_DEPTH};
use confirm_ui::{ButtonEvent, ButtonId, RawButtonEvent};
use defmt::{debug, warn};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Timer};

/// Run a single button edge loop.
///
/// Waits for the pin to go low (pressed), debounces, sends the press edge,
/// then does the same for the release.
pub async fn button_task(
    pin: AnyPin,
    button: ButtonId,
    tx: Sender<'static, CriticalSectionRawMutex, RawButtonEvent, INPUT_QUEUE_DEPTH>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if !btn.is_low() {
            continue;
        }
        send_edge(&tx, ButtonEvent::pressed(button));

        btn.wait_for_rising_edge().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        send_edge(&tx, ButtonEvent::released(button));
    }
}

/// A full queue drops the edge instead of blocking the edge loop.
fn send_edge(
    tx: &Sender<'static, CriticalSectionRawMutex, RawButtonEvent, INPUT_QUEUE_DEPTH>,
    edge: RawButtonEvent,
) {
    debug!("Button: {}", edge);
    if tx.try_send(edge).is_err() {
        warn!("Button: queue full, dropped {}", edge);
    }
}
