//! Unified error types for the relay node firmware.
//!
//! A single `Error` enum that every subsystem converts into, so the main
//! loop handles failures uniformly.  All variants are `Copy`.  None of
//! them is ever returned to an external caller: each one ends up as a log
//! line and, where it matters, an LED pattern.

use core::fmt;

use crate::adapters::ota::OtaError;
use crate::protocol::datagram::RejectReason;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An inbound radio buffer was not a valid datagram.
    Datagram(RejectReason),
    /// A GPIO output could not be driven.
    Actuator(ActuatorError),
    /// The radio link failed to come up.
    Radio(RadioError),
    /// ConfigUpdate networking failed.
    Network(NetworkError),
    /// A firmware upload failed.
    Update(OtaError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datagram(e) => write!(f, "datagram: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Radio(e) => write!(f, "radio: {e}"),
            Self::Network(e) => write!(f, "network: {e}"),
            Self::Update(e) => write!(f, "update: {e}"),
        }
    }
}

impl From<RejectReason> for Error {
    fn from(e: RejectReason) -> Self {
        Self::Datagram(e)
    }
}

impl From<OtaError> for Error {
    fn from(e: OtaError) -> Self {
        Self::Update(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Relay output pin write failed.
    RelayWriteFailed,
    /// Status LED pin write failed.
    LedWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelayWriteFailed => write!(f, "relay GPIO write failed"),
            Self::LedWriteFailed => write!(f, "LED GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// Wi-Fi driver could not be started in station mode.
    WifiStartFailed,
    /// `esp_now_init` failed.
    InitFailed,
    /// Receive callback registration failed.
    CallbackFailed,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WifiStartFailed => write!(f, "Wi-Fi start failed"),
            Self::InitFailed => write!(f, "esp-now init failed"),
            Self::CallbackFailed => write!(f, "esp-now callback registration failed"),
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// No station credentials were compiled in.
    NoCredentials,
    /// SSID or password is not acceptable to the Wi-Fi driver.
    InvalidCredentials,
    /// Station join did not complete within the timeout.
    JoinTimeout,
    /// The fallback access point could not be started.
    AccessPointFailed,
    /// The update web server could not be started.
    ServerFailed,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no Wi-Fi credentials configured"),
            Self::InvalidCredentials => write!(f, "Wi-Fi credentials invalid"),
            Self::JoinTimeout => write!(f, "network join timed out"),
            Self::AccessPointFailed => write!(f, "access point start failed"),
            Self::ServerFailed => write!(f, "update server start failed"),
        }
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

impl core::error::Error for Error {}
impl core::error::Error for ActuatorError {}
impl core::error::Error for RadioError {}
impl core::error::Error for NetworkError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
