//! Application core: pure domain logic, zero direct I/O.
//!
//! Boot-mode selection, datagram dispatch and the ConfigUpdate flow.
//! Hardware is reached through `embedded-hal` pins and the **port
//! traits** in [`ports`], so this layer runs unchanged in host tests.

pub mod boot_mode;
pub mod events;
pub mod ports;
pub mod provision;
pub mod service;
