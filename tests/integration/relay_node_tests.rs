//! Integration tests for the radio → mailbox → RelayNode → GPIO pipeline.
//!
//! Frames go in through an [`RxMailbox`] exactly as the ESP-NOW callback
//! posts them; assertions are made on the mock relay and LED pins.

use crate::mock_hw::{MockPin, MockRadio, RecordingSink};

use espnow_relay::app::events::AppEvent;
use espnow_relay::app::service::RelayNode;
use espnow_relay::config::RelayConfig;
use espnow_relay::drivers::relay::RelayActuator;
use espnow_relay::drivers::status_led::{SignalState, StatusSignal};
use espnow_relay::error::RadioError;
use espnow_relay::protocol::datagram::{Command, RejectReason, RelayState};
use espnow_relay::protocol::mailbox::{MAILBOX_DEPTH, RxMailbox};

const SENDER: [u8; 6] = [0x24, 0x6F, 0x28, 0x11, 0x22, 0x33];

// Magic 0xDEADBEEF goes on the air little-endian.
const SWITCH_ON: [u8; 6] = [0xEF, 0xBE, 0xAD, 0xDE, 0x01, 0x00];
const SWITCH_OFF: [u8; 6] = [0xEF, 0xBE, 0xAD, 0xDE, 0x00, 0x03];

struct Rig {
    node: RelayNode<MockPin, MockPin>,
    relay: MockPin,
    led: MockPin,
    mailbox: RxMailbox,
    sink: RecordingSink,
}

impl Rig {
    fn booted() -> Self {
        let config = RelayConfig::default();
        let relay = MockPin::new();
        let led = MockPin::new();
        let actuator = RelayActuator::new(relay.clone()).unwrap();
        let mut signal = StatusSignal::new(led.clone(), false, &config);
        signal.command(SignalState::FlashSlow, 0);

        let mut rig = Self {
            node: RelayNode::new(actuator, signal),
            relay,
            led,
            mailbox: RxMailbox::new(),
            sink: RecordingSink::new(),
        };
        rig.node.start(&mut MockRadio::ok(), 0, &mut rig.sink);
        rig
    }

    fn inject(&mut self, bytes: &[u8], now_ms: u32) {
        assert!(self.mailbox.post(SENDER, bytes));
        self.node.poll(&self.mailbox, now_ms, &mut self.sink);
    }
}

#[test]
fn relay_is_low_before_any_datagram() {
    let rig = Rig::booted();
    assert_eq!(rig.relay.history(), vec![false]);
    assert_eq!(rig.node.relay_state(), RelayState::Off);
    assert_eq!(rig.node.signal_state(), SignalState::Off);
    assert_eq!(rig.sink.events, vec![AppEvent::RadioReady]);
}

#[test]
fn switch_on_datagram_energises_relay_and_lights_led() {
    let mut rig = Rig::booted();
    rig.inject(&SWITCH_ON, 10);

    assert!(rig.relay.is_high());
    assert_eq!(rig.node.signal_state(), SignalState::On);
    assert!(rig.led.is_high());
    assert!(rig.sink.contains(&AppEvent::DatagramAccepted {
        src: SENDER,
        command: Command { switch_state: 1, active_channels: 0 },
    }));
    assert_eq!(rig.sink.last(), Some(&AppEvent::RelaySet(RelayState::On)));
}

#[test]
fn switch_off_datagram_releases_relay_and_darkens_led() {
    let mut rig = Rig::booted();
    rig.inject(&SWITCH_ON, 10);
    rig.inject(&SWITCH_OFF, 20);

    assert!(!rig.relay.is_high());
    assert_eq!(rig.node.signal_state(), SignalState::Off);
    assert!(!rig.led.is_high());
    assert_eq!(rig.sink.last(), Some(&AppEvent::RelaySet(RelayState::Off)));
}

#[test]
fn short_buffer_is_rejected_without_actuation() {
    let mut rig = Rig::booted();
    rig.inject(&SWITCH_ON, 10);
    let relay_writes = rig.relay.writes();

    rig.inject(&SWITCH_OFF[..5], 20);

    assert_eq!(rig.relay.writes(), relay_writes);
    assert_eq!(rig.node.relay_state(), RelayState::On);
    assert_eq!(rig.node.signal_state(), SignalState::On);
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::DatagramRejected { src: SENDER, reason: RejectReason::BadLength(5) })
    );
}

#[test]
fn wrong_magic_is_rejected_without_actuation() {
    let mut rig = Rig::booted();
    let relay_writes = rig.relay.writes();

    rig.inject(&[0x00, 0x00, 0x00, 0x00, 0x01, 0x00], 10);

    assert_eq!(rig.relay.writes(), relay_writes);
    assert_eq!(rig.node.relay_state(), RelayState::Off);
    assert_eq!(rig.node.signal_state(), SignalState::Off);
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::DatagramRejected { src: SENDER, reason: RejectReason::BadMagic(0) })
    );
}

#[test]
fn big_endian_magic_is_not_accepted() {
    let mut rig = Rig::booted();
    rig.inject(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x00], 10);
    assert_eq!(rig.node.relay_state(), RelayState::Off);
    assert_eq!(
        rig.sink.last(),
        Some(&AppEvent::DatagramRejected {
            src: SENDER,
            reason: RejectReason::BadMagic(0xEFBE_ADDE),
        })
    );
}

#[test]
fn active_channels_do_not_affect_actuation() {
    for channels in [0u8, 1, 0x7F, 0xFF] {
        let mut rig = Rig::booted();
        rig.inject(&[0xEF, 0xBE, 0xAD, 0xDE, 0x05, channels], 10);
        assert_eq!(rig.node.relay_state(), RelayState::On, "channels={channels:#04x}");
        assert_eq!(rig.node.signal_state(), SignalState::On);
    }
}

#[test]
fn repeated_datagram_is_idempotent() {
    let mut rig = Rig::booted();
    rig.inject(&SWITCH_ON, 10);
    let once = (rig.node.relay_state(), rig.node.signal_state(), rig.relay.is_high());
    rig.inject(&SWITCH_ON, 20);
    let twice = (rig.node.relay_state(), rig.node.signal_state(), rig.relay.is_high());
    assert_eq!(once, twice);
}

#[test]
fn burst_is_applied_in_arrival_order() {
    let mut rig = Rig::booted();
    for frame in [SWITCH_ON, SWITCH_OFF, SWITCH_ON] {
        assert!(rig.mailbox.post(SENDER, &frame));
    }
    rig.node.poll(&rig.mailbox, 10, &mut rig.sink);

    // Initial LOW at boot, then ON / OFF / ON.
    assert_eq!(rig.relay.history(), vec![false, true, false, true]);
    assert!(rig.mailbox.is_empty());
}

#[test]
fn overflow_is_reported_once_per_poll() {
    let mut rig = Rig::booted();
    for _ in 0..MAILBOX_DEPTH + 3 {
        rig.mailbox.post(SENDER, &SWITCH_ON);
    }
    rig.node.poll(&rig.mailbox, 10, &mut rig.sink);

    assert!(rig.sink.contains(&AppEvent::FramesDropped(3)));
    let accepted = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::DatagramAccepted { .. }))
        .count();
    assert_eq!(accepted, MAILBOX_DEPTH);

    rig.node.poll(&rig.mailbox, 20, &mut rig.sink);
    let drops = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::FramesDropped(_)))
        .count();
    assert_eq!(drops, 1);
}

#[test]
fn radio_failure_leaves_node_inert_and_flashing() {
    let config = RelayConfig::default();
    let relay = MockPin::new();
    let led = MockPin::new();
    let mut node = RelayNode::new(
        RelayActuator::new(relay.clone()).unwrap(),
        StatusSignal::new(led.clone(), false, &config),
    );
    let mut sink = RecordingSink::new();
    let mut radio = MockRadio::failing(RadioError::InitFailed);

    node.start(&mut radio, 0, &mut sink);
    assert_eq!(radio.init_calls, 1);
    assert!(!node.is_listening());
    assert_eq!(sink.events, vec![AppEvent::RadioFailed(RadioError::InitFailed)]);

    let mailbox = RxMailbox::new();
    mailbox.post(SENDER, &SWITCH_ON);
    let half = config.flash_fast_half_period_ms;
    for t in [0, half, 2 * half, 3 * half] {
        node.poll(&mailbox, t, &mut sink);
    }

    assert_eq!(relay.history(), vec![false]);
    assert_eq!(node.signal_state(), SignalState::FlashFast);
    assert_eq!(led.history(), vec![true, false, true, false]);
    assert!(!mailbox.is_empty());
}
