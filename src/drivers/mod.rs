//! GPIO drivers: relay output, status LED, mode button.

pub mod button;
pub mod relay;
pub mod status_led;
