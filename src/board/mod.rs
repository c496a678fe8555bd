//! nRF52840 board support: two edge-reporting buttons and the OLED canvas.

pub mod buttons;
pub mod display;
