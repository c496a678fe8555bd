//! confirm-ui firmware - nRF52840 + SSD1306 demo.
//!
//! Shows a confirmation dialog, logs the answer, and shows it again.
//! LEFT cancels, RIGHT confirms, both buttons together ask for info. After
//! `SCREEN_AUTO_OFF_TIMEOUT_SECS` without input the dialog is abandoned and
//! the panel switched off until the next button edge.

#![no_std]
#![no_main]

mod board;

use board::buttons::button_task;
use board::display::Oled;
use confirm_ui::config::{DEMO_DIALOG_TIMEOUT_SECS, INPUT_QUEUE_DEPTH};
use confirm_ui::{
    interact_until, raise_if_cancelled, ButtonId, ButtonRequest, ButtonRequestCode,
    ButtonRequestSink, ConfirmDialog, Error, IdleTimer, LayoutController, RawButtonEvent, Result,
};
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Raw edges from the button tasks to the layout controller.
static BUTTON_EDGES: Channel<CriticalSectionRawMutex, RawButtonEvent, INPUT_QUEUE_DEPTH> =
    Channel::new();

static IDLE: StaticCell<IdleTimer> = StaticCell::new();

#[embassy_executor::task(pool_size = 2)]
async fn button(pin: AnyPin, id: ButtonId) -> ! {
    button_task(pin, id, BUTTON_EDGES.sender()).await
}

/// No host link on the demo board: button requests only go to the log.
struct LogSink;

impl ButtonRequestSink for LogSink {
    async fn button_request(&mut self, request: ButtonRequest) -> Result<()> {
        info!("ButtonRequest: {} ({})", request.name, request.code);
        Ok(())
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("confirm-ui starting");
    let p = embassy_nrf::init(Default::default());

    spawner.must_spawn(button(p.P0_11.degrade(), ButtonId::Left));
    spawner.must_spawn(button(p.P0_12.degrade(), ButtonId::Right));

    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = Oled::init(i2c);

    let idle: &'static IdleTimer = IDLE.init(IdleTimer::from_config());
    let input = BUTTON_EDGES.receiver();
    let mut sink = LogSink;
    let request = ButtonRequest::new(ButtonRequestCode::ProtectCall, "confirm_action");

    loop {
        let dialog = ConfirmDialog::new(&mut oled, "Confirm action", "Do you really want to continue?")
            .with_info("INFO")
            .with_countdown(DEMO_DIALOG_TIMEOUT_SECS);
        let layout = LayoutController::new(dialog, input).with_idle(idle);

        let outcome = interact_until(&mut sink, request, layout, idle.wait_idle())
            .await
            .and_then(raise_if_cancelled);

        match outcome {
            Ok(result) => info!("Dialog: {}", result),
            Err(Error::ActionCancelled) => info!("Dialog: cancelled by user"),
            Err(Error::Cancelled) => {
                if idle.screen_on(true) {
                    continue;
                }
                info!("Idle: display off");
                oled.set_power(false);
                // The waking edge is consumed. If it was a press, its release
                // reaches the next dialog with nothing held there and is
                // dropped by the dialog's held-control match.
                let _ = input.receive().await;
                idle.touch();
                oled.set_power(idle.screen_on(true));
            }
            Err(e) => warn!("Dialog failed: {}", e),
        }
    }
}
