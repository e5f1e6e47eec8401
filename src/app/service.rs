//! Operational-mode service: the relay node core.
//!
//! [`RelayNode`] is the context record for normal operation: it owns the
//! relay actuator and the status signal and is the only thing that
//! mutates them.  Radio frames reach it through the
//! [`RxMailbox`]; all I/O beyond GPIO flows through port traits.
//!
//! ```text
//!  RadioPort ──▶ RxMailbox ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                              │       RelayNode        │
//!          relay pin, LED pin ◀│  validate · apply · LED│
//!                              └────────────────────────┘
//! ```

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::drivers::relay::RelayActuator;
use crate::drivers::status_led::{SignalState, StatusSignal};
use crate::error::{Error, Result};
use crate::protocol::datagram::{self, RelayState};
use crate::protocol::mailbox::{RxFrame, RxMailbox};

use super::events::AppEvent;
use super::ports::{EventSink, RadioPort};

// ───────────────────────────────────────────────────────────────
// RelayNode
// ───────────────────────────────────────────────────────────────

pub struct RelayNode<R, L> {
    relay: RelayActuator<R>,
    signal: StatusSignal<L>,
    listening: bool,
}

impl<R: OutputPin, L: OutputPin> RelayNode<R, L> {
    /// Build the node around already-initialised drivers.  The signal
    /// keeps whatever pattern it was showing during boot.
    pub fn new(relay: RelayActuator<R>, signal: StatusSignal<L>) -> Self {
        Self {
            relay,
            signal,
            listening: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring up the radio link.
    ///
    /// A failure is terminal for this boot: the LED flashes fast and the
    /// node ignores the mailbox from then on.
    pub fn start(&mut self, radio: &mut impl RadioPort, now_ms: u32, sink: &mut impl EventSink) {
        match radio.init() {
            Ok(()) => {
                self.listening = true;
                self.signal.command(SignalState::Off, now_ms);
                sink.emit(&AppEvent::RadioReady);
                info!("RelayNode listening");
            }
            Err(e) => {
                self.listening = false;
                self.signal.command(SignalState::FlashFast, now_ms);
                sink.emit(&AppEvent::RadioFailed(e));
                warn!("RelayNode inert: {}", e);
            }
        }
    }

    // ── Dispatch ──────────────────────────────────────────────

    /// Validate one frame and, if it is a datagram, drive the relay and
    /// mirror its state on the LED.  A rejected frame changes nothing.
    pub fn dispatch(&mut self, frame: &RxFrame, now_ms: u32, sink: &mut impl EventSink) -> Result<RelayState> {
        let command = match datagram::validate(frame.payload()) {
            Ok(command) => command,
            Err(reason) => {
                sink.emit(&AppEvent::DatagramRejected { src: frame.src, reason });
                return Err(Error::Datagram(reason));
            }
        };
        sink.emit(&AppEvent::DatagramAccepted { src: frame.src, command });

        let state = self.relay.apply(command.switch_state)?;
        let mirror = if state.is_on() { SignalState::On } else { SignalState::Off };
        self.signal.command(mirror, now_ms);
        sink.emit(&AppEvent::RelaySet(state));
        Ok(state)
    }

    /// One main-loop pass: drain the mailbox in arrival order, then
    /// advance the LED.
    pub fn poll(&mut self, mailbox: &RxMailbox, now_ms: u32, sink: &mut impl EventSink) {
        if self.listening {
            while let Some(frame) = mailbox.take() {
                // Rejects are already reported through the sink.
                if let Err(Error::Actuator(e)) = self.dispatch(&frame, now_ms, sink) {
                    warn!("RelayNode: actuation failed: {}", e);
                }
            }
            let dropped = mailbox.take_dropped();
            if dropped > 0 {
                sink.emit(&AppEvent::FramesDropped(dropped));
            }
        }

        if let Err(e) = self.signal.tick(now_ms) {
            warn!("RelayNode: {}", e);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn relay_state(&self) -> RelayState {
        self.relay.state()
    }

    pub fn signal_state(&self) -> SignalState {
        self.signal.state()
    }

    pub fn signal(&mut self) -> &mut StatusSignal<L> {
        &mut self.signal
    }
}
