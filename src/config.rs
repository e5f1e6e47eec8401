//! Boot-time configuration constants
//!
//! Every tunable the relay node uses, gathered in one place.  Nothing here
//! is editable at runtime; pin numbers live in `pins` and the protocol magic
//! in [`crate::protocol::datagram`].

use serde::{Deserialize, Serialize};

/// Access-point SSID raised when the station join times out.
pub const DEFAULT_AP_SSID: &str = "EspNowRelay-Setup";

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    // --- Console ---
    /// Serial console baud rate
    pub serial_baud: u32,

    // --- Boot mode ---
    /// Length of the debounce window the button must be held (milliseconds)
    pub debounce_window_ms: u32,
    /// Interval between button samples during the window (milliseconds)
    pub debounce_sample_ms: u32,

    // --- Network (ConfigUpdate mode) ---
    /// Upper bound on the station join wait (milliseconds)
    pub join_timeout_ms: u32,
    /// LED toggle interval while joining (milliseconds)
    pub join_blink_ms: u32,
    /// SSID of the fallback access point
    pub ap_ssid: heapless::String<32>,
    /// TCP port of the update web server
    pub http_port: u16,

    // --- Status LED ---
    /// Half-period of the `FlashSlow` pattern (milliseconds)
    pub flash_slow_half_period_ms: u32,
    /// Half-period of the `FlashFast` pattern (milliseconds)
    pub flash_fast_half_period_ms: u32,

    // --- Timing ---
    /// Main loop pass interval (milliseconds)
    pub loop_interval_ms: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let mut ap_ssid = heapless::String::new();
        // DEFAULT_AP_SSID is well under 32 bytes.
        let _ = ap_ssid.push_str(DEFAULT_AP_SSID);

        Self {
            serial_baud: 115_200,

            debounce_window_ms: 1000,
            debounce_sample_ms: 1,

            join_timeout_ms: 20_000,
            join_blink_ms: 250,
            ap_ssid,
            http_port: 80,

            flash_slow_half_period_ms: 500,
            flash_fast_half_period_ms: 125,

            loop_interval_ms: 10,
        }
    }
}
