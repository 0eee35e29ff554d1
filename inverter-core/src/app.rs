//! Application entry point
//!
//! Runs one activation of the watchapp against a host: set up, dispatch
//! events until the host asks to exit, then tear down.

use inverter_hal::Host;

use crate::config::ClockConfig;
use crate::controller::{ClockController, ControllerError};

/// Run the watchapp until the host's event loop ends
///
/// Returns the deactivated controller so callers can inspect its final
/// state. If a handler fails, the controller is still deactivated, every
/// object is released, and the handler's error is returned.
pub async fn run<H: Host>(
    host: &mut H,
    config: ClockConfig,
) -> Result<ClockController, ControllerError> {
    let mut controller = ClockController::new(config);
    controller.activate(host)?;

    while let Some(event) = host.next_event().await {
        if let Err(e) = controller.handle_event(host, event) {
            // The handler's error is the one reported
            if let Err(_teardown) = controller.deactivate(host) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Teardown after failed handler: {:?}", _teardown);
            }
            return Err(e);
        }
    }

    controller.deactivate(host)?;
    Ok(controller)
}
