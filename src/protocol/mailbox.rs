//! Receive mailbox between the radio callback and the main loop.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ ESP-NOW recv cb  │────▶│  RxMailbox   │────▶│  Main Loop   │
//! │ (Wi-Fi task)     │     │  (bounded)   │     │  (dispatch)  │
//! └──────────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The callback only copies bytes in; validation and actuation happen on
//! the loop, one frame at a time, in arrival order.  When the queue is
//! full the newest frame is dropped and counted.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Largest payload the radio delivers (ESP-NOW v1 limit).
pub const MAX_FRAME_LEN: usize = 250;

/// Frames buffered between two loop passes.
pub const MAILBOX_DEPTH: usize = 8;

/// Link-layer address of a sender.
pub type MacAddress = [u8; 6];

/// One received radio buffer, copied out of driver memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxFrame {
    pub src: MacAddress,
    data: heapless::Vec<u8, MAX_FRAME_LEN>,
}

impl RxFrame {
    /// Copy `data` into an owned frame.  Anything beyond [`MAX_FRAME_LEN`]
    /// is cut off; such a frame can never pass datagram validation anyway.
    pub fn new(src: MacAddress, data: &[u8]) -> Self {
        let len = data.len().min(MAX_FRAME_LEN);
        let mut buf = heapless::Vec::new();
        // len <= capacity, cannot fail.
        let _ = buf.extend_from_slice(&data[..len]);
        Self { src, data: buf }
    }

    pub fn payload(&self) -> &[u8] {
        &self.data
    }
}

/// Bounded single-consumer frame queue, safe to share as a `static`.
pub struct RxMailbox {
    queue: Channel<CriticalSectionRawMutex, RxFrame, MAILBOX_DEPTH>,
    dropped: AtomicU32,
}

impl RxMailbox {
    pub const fn new() -> Self {
        Self {
            queue: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Producer side.  Never blocks; returns `false` if the frame was dropped.
    pub fn post(&self, src: MacAddress, data: &[u8]) -> bool {
        if self.queue.try_send(RxFrame::new(src, data)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Consumer side.  Next frame in arrival order, if any.
    pub fn take(&self) -> Option<RxFrame> {
        self.queue.try_receive().ok()
    }

    /// Drop count since the last call, resetting it to zero.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for RxMailbox {
    fn default() -> Self {
        Self::new()
    }
}
