//! Interaction protocol around a layout.
//!
//! Before a dialog is shown the host is told that the device is waiting
//! for the user (a *button request*). The dialog then runs to its single
//! result, unless the caller cancels it first.

use core::future::Future;

use embassy_futures::select::{select, Either};

use crate::error::{Error, Result};
use crate::idle::IdleTouch;
use crate::input::ButtonSource;
use crate::layout::LayoutController;
use crate::renderer::Renderer;
use crate::ui::ConfirmResult;

/// Why the device is waiting for the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonRequestCode {
    Other = 1,
    FeeOverThreshold = 2,
    ConfirmOutput = 3,
    ResetDevice = 4,
    ConfirmWord = 5,
    WipeDevice = 6,
    ProtectCall = 7,
    SignTx = 8,
    Address = 10,
    Success = 17,
    Warning = 18,
    PinEntry = 20,
}

/// Notification sent to the host before a dialog is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonRequest {
    pub code: ButtonRequestCode,
    /// Short machine-readable dialog name, e.g. `"reset_device"`.
    pub name: &'static str,
}

impl ButtonRequest {
    pub const fn new(code: ButtonRequestCode, name: &'static str) -> Self {
        Self { code, name }
    }
}

/// Delivers button requests to the host.
pub trait ButtonRequestSink {
    fn button_request(&mut self, request: ButtonRequest) -> impl Future<Output = Result<()>>;
}

impl<T: ButtonRequestSink> ButtonRequestSink for &mut T {
    fn button_request(&mut self, request: ButtonRequest) -> impl Future<Output = Result<()>> {
        (**self).button_request(request)
    }
}

/// Announce `request` to the host, then run `layout` to its result.
///
/// The layout is not started when the host cannot be notified.
pub async fn interact<R, S, I, K>(
    sink: &mut K,
    request: ButtonRequest,
    layout: LayoutController<R, S, I>,
) -> Result<R::Msg>
where
    R: Renderer,
    S: ButtonSource,
    I: IdleTouch,
    K: ButtonRequestSink,
{
    sink.button_request(request).await.map_err(|e| {
        warn!("interact: button request {} failed", request.name);
        e
    })?;
    debug!("interact: showing {}", request.name);
    Ok(layout.run().await)
}

/// Like [`interact`], abandoned with [`Error::Cancelled`] as soon as
/// `cancel` resolves.
pub async fn interact_until<R, S, I, K, C>(
    sink: &mut K,
    request: ButtonRequest,
    layout: LayoutController<R, S, I>,
    cancel: C,
) -> Result<R::Msg>
where
    R: Renderer,
    S: ButtonSource,
    I: IdleTouch,
    K: ButtonRequestSink,
    C: Future<Output = ()>,
{
    match select(interact(sink, request, layout), cancel).await {
        Either::First(result) => result,
        Either::Second(()) => {
            info!("interact: {} cancelled", request.name);
            Err(Error::Cancelled)
        }
    }
}

/// Treat a user cancel as an error so callers can `?` it.
pub fn raise_if_cancelled(result: ConfirmResult) -> Result<ConfirmResult> {
    match result {
        ConfirmResult::Cancelled => Err(Error::ActionCancelled),
        other => Ok(other),
    }
}
