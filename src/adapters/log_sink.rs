//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the
//! ESP-IDF logger (UART console in production).  One line per event,
//! prefixed `REL |` so the relay stream is easy to grep.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::protocol::mailbox::MacAddress;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

struct Mac<'a>(&'a MacAddress);

impl core::fmt::Display for Mac<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let m = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ModeSelected(mode) => info!("REL | mode={:?}", mode),
            AppEvent::RadioReady => info!("REL | esp-now device ready"),
            AppEvent::RadioFailed(e) => error!("REL | {}", e),
            AppEvent::DatagramAccepted { src, command } => info!(
                "REL | packet received from {}: switchState={} activeChannels={}",
                Mac(src),
                command.switch_state,
                command.active_channels,
            ),
            AppEvent::DatagramRejected { src, reason } => {
                warn!("REL | {} from {}", reason, Mac(src));
            }
            AppEvent::RelaySet(state) => info!("REL | relay {:?}", state),
            AppEvent::FramesDropped(n) => warn!("REL | {} frame(s) dropped, mailbox full", n),
            AppEvent::JoinStarted => info!("REL | joining network..."),
            AppEvent::Joined => info!("REL | network joined"),
            AppEvent::JoinFailed(e) => warn!("REL | join failed: {}", e),
            AppEvent::AccessPointRaised => warn!("REL | configuration access point raised"),
            AppEvent::UpdateServiceReady => info!("REL | HTTP server started"),
            AppEvent::NetworkFault(e) => error!("REL | {}", e),
        }
    }
}
