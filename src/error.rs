//! Unified error type for confirm-ui.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (feature `defmt`) for efficient on-target
//! logging.
//!
//! The input core itself never fails: desynchronised edges are ignored and
//! every interaction ends in a renderer result. These variants belong to
//! the interaction layer around it.

use core::fmt;

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The user chose the cancel action on the dialog.
    ActionCancelled,

    /// The caller withdrew interest before the dialog produced a result.
    Cancelled,

    /// The button request could not be delivered to the host.
    Transport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ActionCancelled => f.write_str("action cancelled by user"),
            Error::Cancelled => f.write_str("interaction cancelled"),
            Error::Transport => f.write_str("button request not delivered"),
        }
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
