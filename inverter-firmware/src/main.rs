//! Inverter - Sweeping Inversion Watchapp firmware
//!
//! Runs the watchapp on an RP2040 with a 128x64 SH1106 OLED on I2C0
//! (SDA = GP4, SCL = GP5). The application task drives the software host;
//! a display task streams presented frames to the panel.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, Async, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use inverter_display::SoftHost;
use {defmt_rtt as _, panic_probe as _};

mod config;
mod platform;
mod sh1106;

use crate::platform::{BoardPlatform, DISPLAY_REFRESH, FRAME};
use crate::sh1106::Sh1106;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

type Panel = Sh1106<I2c<'static, I2C0, Async>>;

/// Pause before a new session after the previous one ended
const RESTART_DELAY: Duration = Duration::from_secs(1);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Inverter firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    let mut panel = Sh1106::new(i2c);
    match panel.init(config::CONTRAST).await {
        Ok(()) => info!("OLED initialized"),
        Err(e) => error!("OLED init failed: {:?}", e),
    }

    spawner.spawn(display_task(panel)).unwrap();
    spawner.spawn(app_task()).unwrap();
    info!("All tasks spawned");
}

/// Watchapp task
///
/// Activates the clock, then services host events for as long as the board
/// produces frames. A failed session is logged and started again.
#[embassy_executor::task]
async fn app_task() {
    let clock = config::clock_config();
    info!(
        "Watchapp starting: {:?}, sweep {:?}, teardown {:?}",
        clock.revision, clock.sweep, clock.teardown
    );

    let mut host = SoftHost::new(BoardPlatform::new());
    loop {
        match inverter_core::run(&mut host, clock).await {
            Ok(controller) => info!("Watchapp exited in state {:?}", controller.state()),
            Err(e) => error!("Watchapp failed: {:?}", e),
        }

        Timer::after(RESTART_DELAY).await;
        info!("Restarting watchapp");
    }
}

/// Display update task
#[embassy_executor::task]
async fn display_task(mut panel: Panel) {
    info!("Display task started");

    loop {
        DISPLAY_REFRESH.wait().await;

        // Copy out so the app is not blocked for the length of the transfer
        let frame = FRAME.lock().await.clone();

        if let Err(e) = panel.flush(&frame).await {
            warn!("OLED flush failed: {:?}", e);
        }
    }
}
