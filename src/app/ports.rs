//! Port traits: the hexagonal boundary between the relay core and the
//! platform collaborators.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RelayNode / ProvisionFlow (domain)
//! ```
//!
//! GPIO goes through `embedded-hal` traits directly; the ports below cover
//! the pieces that are whole subsystems on the device (radio stack, Wi-Fi
//! join, update server) and the outbound event stream.

use crate::error::{NetworkError, RadioError};

// ───────────────────────────────────────────────────────────────
// Radio link (driven adapter: domain → ESP-NOW stack)
// ───────────────────────────────────────────────────────────────

/// Brings up the wireless link.  Once `init` succeeds the adapter posts
/// every received buffer to the receive mailbox; the domain never calls
/// back into the radio after that.
pub trait RadioPort {
    fn init(&mut self) -> Result<(), RadioError>;
}

// ───────────────────────────────────────────────────────────────
// Network / updater (driven adapter: ConfigUpdate mode)
// ───────────────────────────────────────────────────────────────

/// Station join, access-point fallback and the firmware update service.
///
/// Every method must return promptly; [`ProvisionFlow`](super::provision::ProvisionFlow)
/// owns all waiting and timeouts.
pub trait NetworkPort {
    /// Start joining the configured network.  Does not wait for completion.
    fn begin_join(&mut self) -> Result<(), NetworkError>;

    /// Whether the station join has completed (associated and addressed).
    fn is_joined(&mut self) -> bool;

    /// Abandon the join and raise the local configuration access point.
    fn raise_access_point(&mut self) -> Result<(), NetworkError>;

    /// Start the HTTP info page and firmware upload endpoint.
    fn start_update_service(&mut self) -> Result<(), NetworkError>;

    /// Handle any pending client work.  Called once per loop pass.
    fn service(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
