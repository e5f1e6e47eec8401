//! GPIO pin assignments for the relay node board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Relay output
// ---------------------------------------------------------------------------

/// Digital output: HIGH = relay energised, LOW = de-energised.
/// Driven LOW before the boot-mode decision.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Mode-select button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Held LOW through the debounce window at boot → ConfigUpdate mode.
/// GPIO0 doubles as the BOOT strapping button on most dev boards.
pub const BUTTON_GPIO: i32 = 0;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

pub const LED_GPIO: i32 = 2;
/// Set when the LED is wired between VCC and the pin.
pub const LED_ACTIVE_LOW: bool = false;
