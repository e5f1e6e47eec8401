//! ESP-NOW radio adapter.
//!
//! Implements [`RadioPort`]: puts the Wi-Fi driver in station mode (no
//! association), initialises ESP-NOW and registers a receive callback.
//!
//! The callback runs on the Wi-Fi task, not the main loop.  It does
//! nothing but copy `(src, bytes)` into [`RX_MAILBOX`]; validation and
//! actuation happen when the main loop drains the mailbox.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::espnow::EspNow`.
//! - **all other targets**: init always succeeds; tests post straight
//!   into a mailbox.

use log::info;

use crate::app::ports::RadioPort;
use crate::error::RadioError;
use crate::protocol::mailbox::RxMailbox;

/// Handoff point between the radio callback and the main loop.
pub static RX_MAILBOX: RxMailbox = RxMailbox::new();

// ───────────────────────────────────────────────────────────────
// ESP-IDF
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct EspNowRadio {
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
    espnow: Option<esp_idf_svc::espnow::EspNow<'static>>,
}

#[cfg(target_os = "espidf")]
impl EspNowRadio {
    pub fn new(wifi: esp_idf_svc::wifi::EspWifi<'static>) -> Self {
        Self { wifi, espnow: None }
    }
}

#[cfg(target_os = "espidf")]
impl RadioPort for EspNowRadio {
    fn init(&mut self) -> Result<(), RadioError> {
        use esp_idf_svc::espnow::{EspNow, ReceiveInfo};
        use esp_idf_svc::wifi::{ClientConfiguration, Configuration};
        use log::warn;

        self.wifi
            .set_configuration(&Configuration::Client(ClientConfiguration::default()))
            .and_then(|()| self.wifi.start())
            .map_err(|e| {
                warn!("ESP-NOW: wifi start failed: {:?}", e);
                RadioError::WifiStartFailed
            })?;

        let espnow = EspNow::take().map_err(|e| {
            warn!("ESP-NOW: init failed: {:?}", e);
            RadioError::InitFailed
        })?;

        espnow
            .register_recv_cb(|info: &ReceiveInfo, data: &[u8]| {
                RX_MAILBOX.post(*info.src_addr, data);
            })
            .map_err(|e| {
                warn!("ESP-NOW: recv callback registration failed: {:?}", e);
                RadioError::CallbackFailed
            })?;

        self.espnow = Some(espnow);
        info!("ESP-NOW: listening");
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Default)]
pub struct EspNowRadio {
    initialised: bool,
}

#[cfg(not(target_os = "espidf"))]
impl EspNowRadio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }
}

#[cfg(not(target_os = "espidf"))]
impl RadioPort for EspNowRadio {
    fn init(&mut self) -> Result<(), RadioError> {
        self.initialised = true;
        info!("ESP-NOW(sim): listening");
        Ok(())
    }
}
