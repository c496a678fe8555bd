//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and display text
//! limits live here so they can be tuned in one place.

// Input

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Depth of the channel carrying raw edges from the GPIO tasks to the
/// layout controller. Two edges per click, two buttons.
pub const INPUT_QUEUE_DEPTH: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// Actual `embassy_nrf::peripherals::*` types are selected in `main.rs`.
// Adjust for your custom PCB.
//
//   Button LEFT    → P0.11
//   Button RIGHT   → P0.12
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

// Screen

/// Enable automatic OLED screen power-off after inactivity.
pub const SCREEN_AUTO_OFF_ENABLED: bool = true;

/// Inactivity timeout before OLED is turned off (seconds).
pub const SCREEN_AUTO_OFF_TIMEOUT_SECS: u64 = 120;

// Confirmation dialog

/// Countdown tick for dialogs that cancel themselves (ms).
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// Default auto-cancel countdown for the firmware demo dialog (seconds).
pub const DEMO_DIALOG_TIMEOUT_SECS: u32 = 30;

/// Capacity of the dialog title line (bytes).
pub const TITLE_MAX_LEN: usize = 21;

/// Capacity of the dialog action line (bytes).
pub const ACTION_MAX_LEN: usize = 42;

/// Capacity of a button label (bytes).
pub const LABEL_MAX_LEN: usize = 8;
