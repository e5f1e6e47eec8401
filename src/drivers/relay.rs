//! Relay output driver.
//!
//! One digital output: HIGH energises the relay coil, LOW releases it.
//! The pin is forced LOW on construction so the relay is guaranteed off
//! before the boot-mode decision runs.
//!
//! ## Dual-target design
//!
//! Generic over [`embedded_hal::digital::OutputPin`]: on ESP-IDF this is a
//! `PinDriver<Output>`, on host tests a recording mock.

use embedded_hal::digital::{OutputPin, PinState};
use log::error;

use crate::error::ActuatorError;
use crate::protocol::datagram::RelayState;

pub struct RelayActuator<P> {
    pin: P,
    state: RelayState,
}

impl<P: OutputPin> RelayActuator<P> {
    /// Take ownership of the relay pin and drive it LOW.
    pub fn new(mut pin: P) -> Result<Self, ActuatorError> {
        pin.set_low().map_err(|e| {
            error!("relay: initial set_low failed: {:?}", e);
            ActuatorError::RelayWriteFailed
        })?;
        Ok(Self {
            pin,
            state: RelayState::Off,
        })
    }

    /// Drive the relay from a datagram's `switch_state` byte.
    ///
    /// Re-applying the current state re-asserts the pin level and nothing
    /// else.
    pub fn apply(&mut self, switch_state: u8) -> Result<RelayState, ActuatorError> {
        let next = RelayState::from_switch(switch_state);
        let level = if next.is_on() { PinState::High } else { PinState::Low };
        self.pin.set_state(level).map_err(|e| {
            error!("relay: set {:?} failed: {:?}", next, e);
            ActuatorError::RelayWriteFailed
        })?;
        self.state = next;
        Ok(next)
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }
}
