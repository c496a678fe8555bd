//! Button input model.
//!
//! The device has two physical switches (LEFT, RIGHT). A third logical
//! control, MIDDLE, is synthesized by [`DoublePressHandler`] when both
//! switches are held together; hardware never reports it.
//!
//! Raw edges arrive through a [`ButtonSource`] - on target this is the
//! receiving end of the channel fed by the GPIO edge tasks.

pub mod double_press;

pub use double_press::DoublePressHandler;

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;

/// Logical button identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    Left,
    Right,
    /// Both physical buttons held together. Synthetic only.
    Middle,
}

impl ButtonId {
    /// Decode the hardware button number (0 = left, 1 = right).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(ButtonId::Left),
            1 => Some(ButtonId::Right),
            _ => None,
        }
    }

    /// The physical button on the other side, `None` for MIDDLE.
    pub fn opposite(self) -> Option<Self> {
        match self {
            ButtonId::Left => Some(ButtonId::Right),
            ButtonId::Right => Some(ButtonId::Left),
            ButtonId::Middle => None,
        }
    }
}

/// Edge direction of a button event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEventKind {
    Pressed,
    Released,
}

impl ButtonEventKind {
    /// Decode the hardware event code (1 = pressed, 2 = released).
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(ButtonEventKind::Pressed),
            2 => Some(ButtonEventKind::Released),
            _ => None,
        }
    }
}

/// A single button edge.
///
/// Used both for raw hardware edges (LEFT/RIGHT only) and for the effective
/// events dispatched to the renderer, which may name MIDDLE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub kind: ButtonEventKind,
    pub button: ButtonId,
}

/// Hardware-sourced edge. Same shape as [`ButtonEvent`]; the name marks
/// values that have not been through disambiguation yet.
pub type RawButtonEvent = ButtonEvent;

impl ButtonEvent {
    pub const fn new(kind: ButtonEventKind, button: ButtonId) -> Self {
        Self { kind, button }
    }

    pub const fn pressed(button: ButtonId) -> Self {
        Self::new(ButtonEventKind::Pressed, button)
    }

    pub const fn released(button: ButtonId) -> Self {
        Self::new(ButtonEventKind::Released, button)
    }

    /// Decode a `(event, button)` pair from the hardware layer.
    ///
    /// Unknown codes yield `None`; callers drop those edges.
    pub fn from_raw(kind: u8, button: u8) -> Option<Self> {
        Some(Self::new(
            ButtonEventKind::from_raw(kind)?,
            ButtonId::from_raw(button)?,
        ))
    }

    pub fn is_pressed(&self) -> bool {
        self.kind == ButtonEventKind::Pressed
    }

    pub fn is_released(&self) -> bool {
        self.kind == ButtonEventKind::Released
    }
}

/// Suspending, in-order source of raw button edges.
pub trait ButtonSource {
    /// Wait for the next edge.
    ///
    /// Must be cancel-safe: dropping the future before it resolves loses no
    /// event.
    fn next_event(&mut self) -> impl Future<Output = RawButtonEvent>;
}

impl<S: ButtonSource> ButtonSource for &mut S {
    fn next_event(&mut self) -> impl Future<Output = RawButtonEvent> {
        (**self).next_event()
    }
}

impl<'ch, M: RawMutex, const N: usize> ButtonSource for Receiver<'ch, M, RawButtonEvent, N> {
    fn next_event(&mut self) -> impl Future<Output = RawButtonEvent> {
        self.receive()
    }
}
