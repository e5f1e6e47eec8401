//! Outbound application events.
//!
//! The domain emits these through the [`EventSink`](super::ports::EventSink)
//! port.  They are the diagnostic log stream: the only user-visible
//! failure channel besides the LED.

use crate::app::boot_mode::DeviceMode;
use crate::error::{NetworkError, RadioError};
use crate::protocol::datagram::{Command, RejectReason, RelayState};
use crate::protocol::mailbox::MacAddress;

/// Structured events emitted by the relay core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Boot-mode decision made.
    ModeSelected(DeviceMode),

    /// Radio link initialised and listening.
    RadioReady,

    /// Radio link failed to initialise; the node stays inert.
    RadioFailed(RadioError),

    /// A valid datagram arrived.
    DatagramAccepted { src: MacAddress, command: Command },

    /// An inbound buffer was discarded.
    DatagramRejected { src: MacAddress, reason: RejectReason },

    /// Relay output was (re)applied.
    RelaySet(RelayState),

    /// Frames lost because the receive mailbox was full.
    FramesDropped(u32),

    /// Station join started.
    JoinStarted,

    /// Station join completed.
    Joined,

    /// Station join failed or timed out.
    JoinFailed(NetworkError),

    /// Fallback access point is up.
    AccessPointRaised,

    /// Update web server is accepting connections.
    UpdateServiceReady,

    /// A ConfigUpdate collaborator step failed outright.
    NetworkFault(NetworkError),
}
