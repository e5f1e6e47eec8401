//! One-shot boot-mode selection.
//!
//! ```text
//!              released
//!  Sampling ───────────────────────────────▶ Operational
//!     │ pressed                                  ▲
//!     ▼                 released at any sample   │
//!  Debouncing ───────────────────────────────────┘
//!     │ held for the whole window
//!     ▼
//!  ConfigUpdate
//! ```
//!
//! The selector is fed one sample at a time together with a monotonic
//! timestamp, so the window is measured on the clock instead of by busy
//! waiting.  Once decided it never changes.

use crate::config::RelayConfig;

/// Operating mode for the remainder of this boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceMode {
    /// Listen for datagrams and drive the relay.
    Operational,
    /// Join a network and serve the firmware update page.
    ConfigUpdate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sampling,
    Debouncing { since_ms: u32 },
    Decided(DeviceMode),
}

pub struct BootModeSelector {
    phase: Phase,
    window_ms: u32,
}

impl BootModeSelector {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            phase: Phase::Sampling,
            window_ms: config.debounce_window_ms,
        }
    }

    /// Feed one button sample.  Returns the mode once decided.
    pub fn sample(&mut self, pressed: bool, now_ms: u32) -> Option<DeviceMode> {
        match self.phase {
            Phase::Decided(mode) => return Some(mode),
            Phase::Sampling => {
                self.phase = if pressed {
                    Phase::Debouncing { since_ms: now_ms }
                } else {
                    Phase::Decided(DeviceMode::Operational)
                };
            }
            Phase::Debouncing { since_ms } => {
                if !pressed {
                    self.phase = Phase::Decided(DeviceMode::Operational);
                } else if now_ms.wrapping_sub(since_ms) >= self.window_ms {
                    self.phase = Phase::Decided(DeviceMode::ConfigUpdate);
                }
            }
        }
        self.decision()
    }

    pub fn decision(&self) -> Option<DeviceMode> {
        match self.phase {
            Phase::Decided(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn is_debouncing(&self) -> bool {
        matches!(self.phase, Phase::Debouncing { .. })
    }
}
