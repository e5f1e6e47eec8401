//! Radio protocol: the command datagram and its receive path.

pub mod datagram;
pub mod mailbox;
