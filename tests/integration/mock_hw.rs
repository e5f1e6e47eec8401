//! Mock hardware and collaborators for integration tests.
//!
//! Pins record every level written so tests can assert on the physical
//! history without touching real GPIO.  The handles are shared
//! (`Rc<RefCell<..>>`) because the drivers take ownership of their pin.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use espnow_relay::app::events::AppEvent;
use espnow_relay::app::ports::{EventSink, NetworkPort, RadioPort};
use espnow_relay::error::{NetworkError, RadioError};

// ── Output pin ────────────────────────────────────────────────

/// Output pin that logs every level written (`true` = HIGH).
#[derive(Clone, Default)]
pub struct MockPin {
    levels: Rc<RefCell<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.levels.borrow().last().copied().unwrap_or(false)
    }

    pub fn writes(&self) -> usize {
        self.levels.borrow().len()
    }

    pub fn history(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

// ── Button ────────────────────────────────────────────────────

/// Active-low button input.  The test flips `pressed` between samples.
#[derive(Clone, Default)]
pub struct MockButton {
    pressed: Rc<Cell<bool>>,
}

impl MockButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&self, pressed: bool) {
        self.pressed.set(pressed);
    }
}

impl ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.pressed.get())
    }
}

// ── Radio ─────────────────────────────────────────────────────

pub struct MockRadio {
    result: Result<(), RadioError>,
    pub init_calls: u32,
}

impl MockRadio {
    pub fn ok() -> Self {
        Self { result: Ok(()), init_calls: 0 }
    }

    pub fn failing(e: RadioError) -> Self {
        Self { result: Err(e), init_calls: 0 }
    }
}

impl RadioPort for MockRadio {
    fn init(&mut self) -> Result<(), RadioError> {
        self.init_calls += 1;
        self.result
    }
}

// ── Network ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetCall {
    BeginJoin,
    RaiseAccessPoint,
    StartUpdateService,
    Service,
}

/// Scripted network: `join_after` polls of `is_joined` before the join
/// completes, `None` for a join that never completes.
pub struct MockNetwork {
    begin_result: Result<(), NetworkError>,
    join_after: Option<u32>,
    polls: u32,
    pub calls: Vec<NetCall>,
}

#[allow(dead_code)]
impl MockNetwork {
    pub fn joins_after(polls: u32) -> Self {
        Self {
            begin_result: Ok(()),
            join_after: Some(polls),
            polls: 0,
            calls: Vec::new(),
        }
    }

    pub fn never_joins() -> Self {
        Self {
            begin_result: Ok(()),
            join_after: None,
            polls: 0,
            calls: Vec::new(),
        }
    }

    pub fn refusing(e: NetworkError) -> Self {
        Self {
            begin_result: Err(e),
            join_after: None,
            polls: 0,
            calls: Vec::new(),
        }
    }

    pub fn count(&self, call: NetCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

impl NetworkPort for MockNetwork {
    fn begin_join(&mut self) -> Result<(), NetworkError> {
        self.calls.push(NetCall::BeginJoin);
        self.begin_result
    }

    fn is_joined(&mut self) -> bool {
        self.polls += 1;
        self.join_after.is_some_and(|n| self.polls >= n)
    }

    fn raise_access_point(&mut self) -> Result<(), NetworkError> {
        self.calls.push(NetCall::RaiseAccessPoint);
        Ok(())
    }

    fn start_update_service(&mut self) -> Result<(), NetworkError> {
        self.calls.push(NetCall::StartUpdateService);
        Ok(())
    }

    fn service(&mut self) {
        self.calls.push(NetCall::Service);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&AppEvent> {
        self.events.last()
    }

    pub fn contains(&self, event: &AppEvent) -> bool {
        self.events.contains(event)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
