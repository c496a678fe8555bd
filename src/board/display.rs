//! SSD1306 OLED display wrapper.

use core::fmt::Write;

use confirm_ui::{ButtonId, Canvas, DialogView};
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Characters per text row with `FONT_6X10` on a 128 px wide panel.
const ROW_CHARS: usize = 21;

/// The OLED as a dialog canvas.
pub struct Oled<I2C> {
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn init(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        let _ = display.init();
        display.clear_buffer();
        let _ = display.flush();
        Self { display }
    }

    /// Switch the panel on or off without touching the frame buffer.
    pub fn set_power(&mut self, on: bool) {
        let _ = self.display.set_display_on(on);
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn highlighted_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::Off)
        .background_color(BinaryColor::On)
        .build()
}

fn label_style(view: &DialogView<'_>, button: ButtonId) -> MonoTextStyle<'static, BinaryColor> {
    if view.highlighted == Some(button) {
        highlighted_style()
    } else {
        text_style()
    }
}

/// Split `text` after at most `ROW_CHARS` characters.
fn split_row(text: &str) -> (&str, &str) {
    match text.char_indices().nth(ROW_CHARS) {
        Some((at, _)) => text.split_at(at),
        None => (text, ""),
    }
}

impl<I2C> Canvas for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn clear(&mut self) {
        self.display.clear_buffer();
        let _ = self.display.flush();
    }

    fn draw_dialog(&mut self, view: &DialogView<'_>) {
        let display = &mut self.display;
        display.clear_buffer();

        let _ = Text::new(view.title, Point::new(0, 10), text_style()).draw(display);

        if let Some(secs) = view.countdown {
            let mut countdown: heapless::String<8> = heapless::String::new();
            let _ = write!(countdown, "{}s", secs);
            let _ = Text::with_alignment(
                countdown.as_str(),
                Point::new(127, 10),
                text_style(),
                Alignment::Right,
            )
            .draw(display);
        }

        let (first, rest) = split_row(view.action);
        let _ = Text::new(first, Point::new(0, 26), text_style()).draw(display);
        if !rest.is_empty() {
            let _ = Text::new(rest, Point::new(0, 38), text_style()).draw(display);
        }

        let _ = Text::new(
            view.cancel_label,
            Point::new(0, 62),
            label_style(view, ButtonId::Left),
        )
        .draw(display);
        if let Some(info) = view.info_label {
            let _ = Text::with_alignment(
                info,
                Point::new(64, 62),
                label_style(view, ButtonId::Middle),
                Alignment::Center,
            )
            .draw(display);
        }
        let _ = Text::with_alignment(
            view.confirm_label,
            Point::new(127, 62),
            label_style(view, ButtonId::Right),
            Alignment::Right,
        )
        .draw(display);

        let _ = display.flush();
    }
}
