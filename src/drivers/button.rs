//! Mode-select push-button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up: the input idles HIGH and
//! reads LOW while pressed.  The button is only ever read during the
//! boot-mode decision; nothing samples it afterwards.

use embedded_hal::digital::InputPin;
use log::warn;

pub struct ModeButton<P> {
    pin: P,
}

impl<P: InputPin> ModeButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// `true` while the button is held.  A failed read counts as released,
    /// so a broken input can only ever lead to a normal boot.
    pub fn is_pressed(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(e) => {
                warn!("button: read failed ({:?}), treating as released", e);
                false
            }
        }
    }

    /// Give the pin back once the boot decision is made.
    pub fn release(self) -> P {
        self.pin
    }
}
