//! Screens shown through the layout controller.
//!
//! Drawing is kept behind [`Canvas`], so dialog logic runs on the host and
//! the OLED backend lives with the firmware.

pub mod confirm;

pub use confirm::{Canvas, ConfirmDialog, ConfirmResult, DialogView, COUNTDOWN_TOKEN};
