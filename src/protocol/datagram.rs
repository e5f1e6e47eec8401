//! Relay command datagram codec.
//!
//! Wire format (6 bytes, no padding):
//! ```text
//! ┌──────────────┬─────────────┬────────────────┐
//! │ Magic (4B)   │ Switch (1B) │ Channels (1B)  │
//! │ LE u32       │ 0 = off     │ reserved mask  │
//! │ 0xDEADBEEF   │ else = on   │                │
//! └──────────────┴─────────────┴────────────────┘
//! ```
//!
//! `validate` is pure: it never logs and never touches relay or LED
//! state.  Callers report the accept/reject decision themselves.

use core::fmt;

/// Protocol tag every datagram must carry.
pub const MAGIC: u32 = 0xDEAD_BEEF;

/// Exact on-air size of a datagram.
pub const DATAGRAM_LEN: usize = 6;

const MAGIC_LEN: usize = 4;

/// Logical relay output state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

impl RelayState {
    pub fn from_switch(switch_state: u8) -> Self {
        if switch_state == 0 { Self::Off } else { Self::On }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Why an inbound buffer was not accepted as a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Buffer length differs from [`DATAGRAM_LEN`]; carries the actual length.
    BadLength(usize),
    /// First four bytes (LE) are not [`MAGIC`]; carries what was found.
    BadMagic(u32),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength(len) => write!(f, "invalid packet size: {len}"),
            Self::BadMagic(magic) => write!(f, "invalid magic key: {magic:#010x}"),
        }
    }
}

impl core::error::Error for RejectReason {}

/// Payload of an accepted datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub switch_state: u8,
    /// Reserved for multi-output hardware; never consulted by actuation.
    pub active_channels: u8,
}

impl Command {
    pub fn relay_state(&self) -> RelayState {
        RelayState::from_switch(self.switch_state)
    }
}

/// Validate a raw radio buffer and extract its command.
pub fn validate(bytes: &[u8]) -> Result<Command, RejectReason> {
    let Ok(raw) = <[u8; DATAGRAM_LEN]>::try_from(bytes) else {
        return Err(RejectReason::BadLength(bytes.len()));
    };

    let magic = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    if magic != MAGIC {
        return Err(RejectReason::BadMagic(magic));
    }

    Ok(Command {
        switch_state: raw[MAGIC_LEN],
        active_channels: raw[MAGIC_LEN + 1],
    })
}

/// Sender-side view of a datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datagram {
    pub magic: u32,
    pub switch_state: u8,
    pub active_channels: u8,
}

impl Datagram {
    /// A well-formed datagram carrying the protocol magic.
    pub fn new(switch_state: u8, active_channels: u8) -> Self {
        Self {
            magic: MAGIC,
            switch_state,
            active_channels,
        }
    }

    pub fn encode(&self) -> [u8; DATAGRAM_LEN] {
        let mut out = [0u8; DATAGRAM_LEN];
        out[..MAGIC_LEN].copy_from_slice(&self.magic.to_le_bytes());
        out[MAGIC_LEN] = self.switch_state;
        out[MAGIC_LEN + 1] = self.active_channels;
        out
    }
}
