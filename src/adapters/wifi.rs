//! Wi-Fi adapter for ConfigUpdate mode.
//!
//! Implements [`NetworkPort`]: station join with the compiled-in
//! credentials, the open fallback access point, and the update server.
//! Timeouts belong to [`ProvisionFlow`](crate::app::provision::ProvisionFlow);
//! every call here returns promptly.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::wifi::EspWifi` plus
//!   [`UpdateServer`](super::update_server::UpdateServer).
//! - **all other targets**: simulation that reports the join complete
//!   after a few polls.
//!
//! ## Credentials
//!
//! `RELAY_WIFI_SSID` / `RELAY_WIFI_PASSWORD` are read at build time
//! (`build.rs`, optionally from `.env`).  An empty SSID means "no
//! credentials": the join is refused and the flow goes straight to the
//! access point.

use log::info;

use crate::app::ports::NetworkPort;
use crate::config::RelayConfig;
use crate::error::NetworkError;

const COMPILED_SSID: &str = env!("RELAY_WIFI_SSID");
const COMPILED_PASSWORD: &str = env!("RELAY_WIFI_PASSWORD");

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), NetworkError> {
    if ssid.is_empty() {
        return Err(NetworkError::NoCredentials);
    }
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(NetworkError::InvalidCredentials);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), NetworkError> {
    // Empty means an open network.
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(NetworkError::InvalidCredentials);
    }
    Ok(())
}

/// Station credentials, checked against what the Wi-Fi driver accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
}

impl Credentials {
    pub fn new(ssid: &str, password: &str) -> Result<Self, NetworkError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        let mut c = Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
        };
        c.ssid.push_str(ssid).map_err(|_| NetworkError::InvalidCredentials)?;
        c.password
            .push_str(password)
            .map_err(|_| NetworkError::InvalidCredentials)?;
        Ok(c)
    }

    /// The credentials baked in at build time.
    pub fn compiled() -> Result<Self, NetworkError> {
        Self::new(COMPILED_SSID, COMPILED_PASSWORD)
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct WifiProvisioner {
    wifi: esp_idf_svc::wifi::EspWifi<'static>,
    credentials: Result<Credentials, NetworkError>,
    ap_ssid: heapless::String<32>,
    http_port: u16,
    server: Option<super::update_server::UpdateServer>,
}

#[cfg(target_os = "espidf")]
impl WifiProvisioner {
    pub fn new(wifi: esp_idf_svc::wifi::EspWifi<'static>, config: &RelayConfig) -> Self {
        Self {
            wifi,
            credentials: Credentials::compiled(),
            ap_ssid: config.ap_ssid.clone(),
            http_port: config.http_port,
            server: None,
        }
    }
}

#[cfg(target_os = "espidf")]
impl NetworkPort for WifiProvisioner {
    fn begin_join(&mut self) -> Result<(), NetworkError> {
        use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
        use log::warn;

        let creds = self.credentials.clone()?;
        let config = Configuration::Client(ClientConfiguration {
            ssid: creds.ssid.as_str().try_into().map_err(|_| NetworkError::InvalidCredentials)?,
            password: creds
                .password
                .as_str()
                .try_into()
                .map_err(|_| NetworkError::InvalidCredentials)?,
            auth_method: if creds.is_open() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        });

        self.wifi
            .set_configuration(&config)
            .and_then(|()| self.wifi.start())
            .and_then(|()| self.wifi.connect())
            .map_err(|e| {
                warn!("WiFi: station start failed: {:?}", e);
                NetworkError::InvalidCredentials
            })?;
        info!("WiFi: joining '{}'", creds.ssid);
        Ok(())
    }

    fn is_joined(&mut self) -> bool {
        self.wifi.is_up().unwrap_or(false)
    }

    fn raise_access_point(&mut self) -> Result<(), NetworkError> {
        use esp_idf_svc::wifi::{AccessPointConfiguration, AuthMethod, Configuration};
        use log::warn;

        // Join may still be in flight; the driver is restarted in AP mode.
        let _ = self.wifi.disconnect();
        let _ = self.wifi.stop();

        let config = Configuration::AccessPoint(AccessPointConfiguration {
            ssid: self
                .ap_ssid
                .as_str()
                .try_into()
                .map_err(|_| NetworkError::AccessPointFailed)?,
            auth_method: AuthMethod::None,
            ..Default::default()
        });

        self.wifi
            .set_configuration(&config)
            .and_then(|()| self.wifi.start())
            .map_err(|e| {
                warn!("WiFi: access point start failed: {:?}", e);
                NetworkError::AccessPointFailed
            })?;
        info!("WiFi: access point '{}' up", self.ap_ssid);
        Ok(())
    }

    fn start_update_service(&mut self) -> Result<(), NetworkError> {
        if self.server.is_some() {
            return Ok(());
        }
        let server = super::update_server::UpdateServer::start(self.http_port).map_err(|e| {
            log::error!("WiFi: update server failed: {:?}", e);
            NetworkError::ServerFailed
        })?;
        self.server = Some(server);
        Ok(())
    }

    fn service(&mut self) {
        // EspHttpServer handles clients on its own task.
    }
}

// ───────────────────────────────────────────────────────────────
// Simulation
// ───────────────────────────────────────────────────────────────

/// Polls of `is_joined` before the simulated join completes.
#[cfg(not(target_os = "espidf"))]
const SIM_JOIN_POLLS: u32 = 3;

#[cfg(not(target_os = "espidf"))]
pub struct WifiProvisioner {
    credentials: Result<Credentials, NetworkError>,
    ap_ssid: heapless::String<32>,
    http_port: u16,
    joining: bool,
    join_polls: u32,
    ap_up: bool,
    serving: bool,
}

#[cfg(not(target_os = "espidf"))]
impl WifiProvisioner {
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_credentials(Credentials::compiled(), config)
    }

    pub fn with_credentials(
        credentials: Result<Credentials, NetworkError>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            credentials,
            ap_ssid: config.ap_ssid.clone(),
            http_port: config.http_port,
            joining: false,
            join_polls: 0,
            ap_up: false,
            serving: false,
        }
    }

    pub fn is_access_point_up(&self) -> bool {
        self.ap_up
    }

    pub fn is_serving(&self) -> bool {
        self.serving
    }
}

#[cfg(not(target_os = "espidf"))]
impl NetworkPort for WifiProvisioner {
    fn begin_join(&mut self) -> Result<(), NetworkError> {
        let creds = self.credentials.clone()?;
        self.joining = true;
        self.join_polls = 0;
        info!("WiFi(sim): joining '{}'", creds.ssid);
        Ok(())
    }

    fn is_joined(&mut self) -> bool {
        if !self.joining {
            return false;
        }
        self.join_polls = self.join_polls.saturating_add(1);
        self.join_polls >= SIM_JOIN_POLLS
    }

    fn raise_access_point(&mut self) -> Result<(), NetworkError> {
        self.joining = false;
        self.ap_up = true;
        info!("WiFi(sim): access point '{}' up", self.ap_ssid);
        Ok(())
    }

    fn start_update_service(&mut self) -> Result<(), NetworkError> {
        self.serving = true;
        info!("WiFi(sim): update server on port {}", self.http_port);
        Ok(())
    }

    fn service(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
