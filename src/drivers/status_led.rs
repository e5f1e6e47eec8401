//! Single-colour status LED with timer-driven patterns.
//!
//! Other components *command* a [`SignalState`]; the main loop calls
//! [`StatusSignal::tick`] every pass and the driver derives the physical
//! level from the time elapsed since the last transition.  Only the
//! latest command is kept.
//!
//! ## Patterns
//!
//! | State      | Output                                  |
//! |------------|-----------------------------------------|
//! | Off        | dark                                    |
//! | On         | lit                                     |
//! | FlashSlow  | lit/dark, `flash_slow_half_period_ms`   |
//! | FlashFast  | lit/dark, `flash_fast_half_period_ms`   |
//!
//! Flashing patterns start lit at the moment of transition.

use embedded_hal::digital::{OutputPin, PinState};
use log::error;

use crate::config::RelayConfig;
use crate::error::ActuatorError;

/// LED pattern identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SignalState {
    Off = 0,
    On = 1,
    FlashSlow = 2,
    FlashFast = 3,
}

pub struct StatusSignal<P> {
    pin: P,
    active_low: bool,
    slow_half_ms: u32,
    fast_half_ms: u32,
    state: SignalState,
    since_ms: u32,
    /// Last level written to the pin; `None` until the first tick.
    lit: Option<bool>,
}

impl<P: OutputPin> StatusSignal<P> {
    pub fn new(pin: P, active_low: bool, config: &RelayConfig) -> Self {
        Self {
            pin,
            active_low,
            slow_half_ms: config.flash_slow_half_period_ms.max(1),
            fast_half_ms: config.flash_fast_half_period_ms.max(1),
            state: SignalState::Off,
            since_ms: 0,
            lit: None,
        }
    }

    /// Switch to `state`.  Re-commanding the current state keeps the
    /// running flash phase.
    pub fn command(&mut self, state: SignalState, now_ms: u32) {
        if state == self.state {
            return;
        }
        self.state = state;
        self.since_ms = now_ms;
    }

    /// Currently commanded pattern.
    pub fn state(&self) -> SignalState {
        self.state
    }

    /// Recompute the output level and write it if it changed.
    pub fn tick(&mut self, now_ms: u32) -> Result<bool, ActuatorError> {
        let lit = self.level_at(now_ms);
        if self.lit != Some(lit) {
            let high = lit != self.active_low;
            self.pin.set_state(PinState::from(high)).map_err(|e| {
                error!("status LED: write failed: {:?}", e);
                ActuatorError::LedWriteFailed
            })?;
            self.lit = Some(lit);
        }
        Ok(lit)
    }

    /// Whether the LED is currently lit, as last written.
    pub fn is_lit(&self) -> bool {
        self.lit.unwrap_or(false)
    }

    fn level_at(&self, now_ms: u32) -> bool {
        let elapsed = now_ms.wrapping_sub(self.since_ms);
        match self.state {
            SignalState::Off => false,
            SignalState::On => true,
            SignalState::FlashSlow => (elapsed / self.slow_half_ms) % 2 == 0,
            SignalState::FlashFast => (elapsed / self.fast_half_ms) % 2 == 0,
        }
    }
}
