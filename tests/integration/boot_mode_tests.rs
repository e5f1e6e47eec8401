//! Boot-mode selection driven the way the firmware's boot loop drives it:
//! one button sample per millisecond, LED ticked between samples.

use crate::mock_hw::{MockButton, MockPin};

use espnow_relay::app::boot_mode::{BootModeSelector, DeviceMode};
use espnow_relay::config::RelayConfig;
use espnow_relay::drivers::button::ModeButton;
use espnow_relay::drivers::status_led::{SignalState, StatusSignal};

/// Run the boot loop until a decision, releasing the button at
/// `release_at_ms` (if any).  Returns the mode and the decision time.
fn run_boot(release_at_ms: Option<u32>, led: &MockPin) -> (DeviceMode, u32) {
    let config = RelayConfig::default();
    let input = MockButton::new();
    input.set_pressed(true);
    let mut button = ModeButton::new(input.clone());
    let mut signal = StatusSignal::new(led.clone(), false, &config);
    signal.command(SignalState::FlashSlow, 0);
    let mut selector = BootModeSelector::new(&config);

    let mut now_ms = 0;
    loop {
        if release_at_ms == Some(now_ms) {
            input.set_pressed(false);
        }
        if let Some(mode) = selector.sample(button.is_pressed(), now_ms) {
            return (mode, now_ms);
        }
        signal.tick(now_ms).unwrap();
        now_ms += config.debounce_sample_ms;
        assert!(now_ms <= 5_000, "boot selector never decided");
    }
}

#[test]
fn held_through_window_enters_config_update() {
    // Held for 1200 ms: the decision lands when the 1000 ms window closes.
    let led = MockPin::new();
    let (mode, at) = run_boot(Some(1200), &led);
    assert_eq!(mode, DeviceMode::ConfigUpdate);
    assert_eq!(at, 1000);
}

#[test]
fn released_early_enters_operational() {
    let led = MockPin::new();
    let (mode, at) = run_boot(Some(400), &led);
    assert_eq!(mode, DeviceMode::Operational);
    assert_eq!(at, 400);
}

#[test]
fn not_pressed_at_boot_is_immediate() {
    let config = RelayConfig::default();
    let input = MockButton::new();
    let mut button = ModeButton::new(input);
    let mut selector = BootModeSelector::new(&config);
    assert_eq!(selector.sample(button.is_pressed(), 0), Some(DeviceMode::Operational));
}

#[test]
fn led_flashes_slowly_during_debounce() {
    let led = MockPin::new();
    let (_, at) = run_boot(None, &led);
    assert_eq!(at, 1000);
    // 500 ms half-period over 0..1000 ms: lit, dark.
    assert_eq!(led.history(), vec![true, false]);
}

#[test]
fn decision_is_sticky() {
    let config = RelayConfig::default();
    let mut selector = BootModeSelector::new(&config);
    assert_eq!(selector.sample(true, 0), None);
    assert_eq!(selector.sample(true, 1000), Some(DeviceMode::ConfigUpdate));
    assert_eq!(selector.sample(false, 1001), Some(DeviceMode::ConfigUpdate));
}
