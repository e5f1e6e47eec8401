//! ConfigUpdate-mode flow: join a network, or fall back to a local access
//! point, then serve the firmware update page.
//!
//! ```text
//!  Idle ──start──▶ Joining ──joined──▶ Serving(Station)      LED FlashSlow
//!                    │  (LED blinks On/Off while waiting)
//!                    └──timeout / begin failed──▶ Serving(AccessPoint)  LED FlashFast
//! ```
//!
//! The join wait is always bounded by `join_timeout_ms`.  Every step is
//! driven from [`ProvisionFlow::tick`] with the loop's monotonic clock, so
//! nothing here blocks.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::config::RelayConfig;
use crate::drivers::status_led::{SignalState, StatusSignal};
use crate::error::NetworkError;

use super::events::AppEvent;
use super::ports::{EventSink, NetworkPort};

/// Which interface the update service ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingVia {
    Station,
    AccessPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    Idle,
    Joining { since_ms: u32, last_blink_ms: u32 },
    Serving(ServingVia),
}

pub struct ProvisionFlow {
    state: ProvisionState,
    join_timeout_ms: u32,
    blink_ms: u32,
}

impl ProvisionFlow {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            state: ProvisionState::Idle,
            join_timeout_ms: config.join_timeout_ms,
            blink_ms: config.join_blink_ms.max(1),
        }
    }

    pub fn state(&self) -> ProvisionState {
        self.state
    }

    /// Kick off the station join.  If the collaborator cannot even begin
    /// (no credentials, driver error) go straight to the access point.
    pub fn start<L: OutputPin>(
        &mut self,
        net: &mut impl NetworkPort,
        signal: &mut StatusSignal<L>,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        if self.state != ProvisionState::Idle {
            return;
        }
        match net.begin_join() {
            Ok(()) => {
                sink.emit(&AppEvent::JoinStarted);
                signal.command(SignalState::On, now_ms);
                self.state = ProvisionState::Joining {
                    since_ms: now_ms,
                    last_blink_ms: now_ms,
                };
            }
            Err(e) => {
                sink.emit(&AppEvent::JoinFailed(e));
                self.fall_back(net, signal, now_ms, sink);
            }
        }
    }

    /// One main-loop pass.
    pub fn tick<L: OutputPin>(
        &mut self,
        net: &mut impl NetworkPort,
        signal: &mut StatusSignal<L>,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        match self.state {
            ProvisionState::Idle => {}

            ProvisionState::Joining { since_ms, last_blink_ms } => {
                if net.is_joined() {
                    sink.emit(&AppEvent::Joined);
                    info!("Provision: joined, starting update service");
                    self.serve(net, ServingVia::Station, signal, now_ms, sink);
                    return;
                }

                if now_ms.wrapping_sub(since_ms) >= self.join_timeout_ms {
                    warn!("Provision: join timed out after {} ms", self.join_timeout_ms);
                    sink.emit(&AppEvent::JoinFailed(NetworkError::JoinTimeout));
                    self.fall_back(net, signal, now_ms, sink);
                    return;
                }

                if now_ms.wrapping_sub(last_blink_ms) >= self.blink_ms {
                    let next = if signal.state() == SignalState::On {
                        SignalState::Off
                    } else {
                        SignalState::On
                    };
                    signal.command(next, now_ms);
                    self.state = ProvisionState::Joining {
                        since_ms,
                        last_blink_ms: now_ms,
                    };
                }
            }

            ProvisionState::Serving(_) => net.service(),
        }
    }

    fn fall_back<L: OutputPin>(
        &mut self,
        net: &mut impl NetworkPort,
        signal: &mut StatusSignal<L>,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        signal.command(SignalState::FlashFast, now_ms);
        match net.raise_access_point() {
            Ok(()) => sink.emit(&AppEvent::AccessPointRaised),
            Err(e) => {
                sink.emit(&AppEvent::NetworkFault(e));
                warn!("Provision: {}", e);
            }
        }
        self.serve(net, ServingVia::AccessPoint, signal, now_ms, sink);
    }

    fn serve<L: OutputPin>(
        &mut self,
        net: &mut impl NetworkPort,
        via: ServingVia,
        signal: &mut StatusSignal<L>,
        now_ms: u32,
        sink: &mut impl EventSink,
    ) {
        match net.start_update_service() {
            Ok(()) => {
                sink.emit(&AppEvent::UpdateServiceReady);
                // The access-point fallback keeps its own distinct pattern.
                if via == ServingVia::Station {
                    signal.command(SignalState::FlashSlow, now_ms);
                }
            }
            Err(e) => {
                sink.emit(&AppEvent::NetworkFault(e));
                warn!("Provision: {}", e);
            }
        }
        self.state = ProvisionState::Serving(via);
    }
}
