//! Fuzz target: `datagram::validate`
//!
//! Feeds arbitrary radio payloads through the validator and the receive
//! frame copy.  Asserts it never panics and that only six-byte buffers
//! carrying the protocol magic are ever accepted.
//!
//! cargo fuzz run fuzz_datagram

#![no_main]

use espnow_relay::protocol::datagram::{self, DATAGRAM_LEN, MAGIC, RejectReason};
use espnow_relay::protocol::mailbox::{MAX_FRAME_LEN, RxFrame};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match datagram::validate(data) {
        Ok(cmd) => {
            assert_eq!(data.len(), DATAGRAM_LEN);
            assert_eq!(u32::from_le_bytes([data[0], data[1], data[2], data[3]]), MAGIC);
            assert_eq!(cmd.switch_state, data[4]);
            assert_eq!(cmd.active_channels, data[5]);
        }
        Err(RejectReason::BadLength(n)) => assert_ne!(n, DATAGRAM_LEN),
        Err(RejectReason::BadMagic(m)) => assert_ne!(m, MAGIC),
    }

    // The callback copy is bounded; a truncated oversize frame must still
    // be rejected.
    let frame = RxFrame::new([0; 6], data);
    assert!(frame.payload().len() <= MAX_FRAME_LEN);
    if data.len() != DATAGRAM_LEN {
        assert!(datagram::validate(frame.payload()).is_err());
    }
});
