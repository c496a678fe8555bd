//! Two-button confirmation UI core.
//!
//! Turns the edges of two physical buttons into a three-control input
//! (LEFT, RIGHT and MIDDLE = both together) and runs one on-screen
//! interaction at a time to a single result, interleaving button handling
//! with renderer-requested timers on a cooperative executor.
//!
//! ```text
//! raw edges ─► DoublePressHandler ─► Renderer::button_event ─┐
//!                                                            ├─► result
//! Timer ─────────────────────────► Renderer::timer_event ────┘
//! ```
//!
//! Everything here is `no_std` and allocation-free; tests run on the host
//! (`cargo test`) with embassy-time's std driver.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod idle;
pub mod input;
pub mod interact;
pub mod layout;
pub mod renderer;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
pub use idle::{IdleTimer, IdleTouch, NoIdle};
pub use input::{ButtonEvent, ButtonEventKind, ButtonId, ButtonSource, DoublePressHandler, RawButtonEvent};
pub use interact::{interact, interact_until, raise_if_cancelled, ButtonRequest, ButtonRequestCode, ButtonRequestSink};
pub use layout::LayoutController;
pub use renderer::{EventCtx, Renderer};
pub use timer::{Timer, TimerEntry, TimerToken};
pub use ui::{Canvas, ConfirmDialog, ConfirmResult, DialogView};
