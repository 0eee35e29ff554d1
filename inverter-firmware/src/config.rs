//! Build-time watchapp configuration
//!
//! The constants are generated by build.rs from watchapp.toml.

use inverter_core::config::{ClockConfig, LayoutConfig, RestartPolicy, Revision, TeardownPolicy};

include!(concat!(env!("OUT_DIR"), "/watchapp_config.rs"));

/// Clock configuration for the 128x64 panel
pub fn clock_config() -> ClockConfig {
    let mut config = ClockConfig::for_revision(REVISION)
        .with_layout(LayoutConfig::oled_128x64())
        .with_teardown(TEARDOWN);

    if let Some(restart) = RESTART_POLICY {
        config = config.with_restart_policy(restart);
    }
    if let Some(duration_ms) = SWEEP_DURATION_MS {
        config = config.with_sweep_duration(duration_ms);
    }

    config
}
