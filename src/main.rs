//! ESP-NOW Relay Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  EspNowRadio    WifiProvisioner   LogEventSink   Esp32Time     │
//! │  (RadioPort)    (NetworkPort)     (EventSink)                  │
//! │       │                                                        │
//! │       └──▶ RX_MAILBOX                                          │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  BootModeSelector ─▶ RelayNode  |  ProvisionFlow       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  RelayActuator · StatusSignal · ModeButton (embedded-hal)      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot: relay LOW, LED FlashSlow, button debounce picks the mode, then
//! one cooperative loop runs for the rest of the boot.
#![deny(unused_must_use)]

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp_idf_hal::delay::FreeRtos;
    use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::EspWifi;
    use log::{info, warn};

    use espnow_relay::adapters::espnow::{EspNowRadio, RX_MAILBOX};
    use espnow_relay::adapters::log_sink::LogEventSink;
    use espnow_relay::adapters::ota;
    use espnow_relay::adapters::time::Esp32TimeAdapter;
    use espnow_relay::adapters::update_server::{BUILD_TIMESTAMP, FIRMWARE_VERSION};
    use espnow_relay::adapters::wifi::WifiProvisioner;
    use espnow_relay::app::boot_mode::{BootModeSelector, DeviceMode};
    use espnow_relay::app::events::AppEvent;
    use espnow_relay::app::ports::EventSink;
    use espnow_relay::app::provision::ProvisionFlow;
    use espnow_relay::app::service::RelayNode;
    use espnow_relay::config::RelayConfig;
    use espnow_relay::drivers::button::ModeButton;
    use espnow_relay::drivers::relay::RelayActuator;
    use espnow_relay::drivers::status_led::{SignalState, StatusSignal};
    use espnow_relay::pins;

    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = RelayConfig::default();
    info!("╔══════════════════════════════════════╗");
    info!("║  ESP-NOW Relay v{}                ║", FIRMWARE_VERSION);
    info!("╚══════════════════════════════════════╝");
    info!("Built {} · console {} baud", BUILD_TIMESTAMP, config.serial_baud);

    ota::check_rollback();

    // ── 2. GPIO ───────────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: each GPIO number in `pins` is claimed exactly once, here,
    // and none of them is also taken from `peripherals.pins`.
    let relay_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::RELAY_GPIO) })?;
    // SAFETY: as above.
    let led_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::LED_GPIO) })?;
    // SAFETY: as above.
    let mut button_pin = PinDriver::input(unsafe { AnyIOPin::new(pins::BUTTON_GPIO) })?;
    button_pin.set_pull(Pull::Up)?;

    let relay = RelayActuator::new(relay_pin)?;
    let mut signal = StatusSignal::new(led_pin, pins::LED_ACTIVE_LOW, &config);
    let time = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    signal.command(SignalState::FlashSlow, time.now_ms());

    // ── 3. Boot-mode decision ─────────────────────────────────
    let mut button = ModeButton::new(button_pin);
    let mut selector = BootModeSelector::new(&config);
    let mode = loop {
        let now_ms = time.now_ms();
        if let Some(mode) = selector.sample(button.is_pressed(), now_ms) {
            break mode;
        }
        if let Err(e) = signal.tick(now_ms) {
            warn!("Boot: {}", e);
        }
        FreeRtos::delay_ms(config.debounce_sample_ms);
    };
    drop(button.release());
    sink.emit(&AppEvent::ModeSelected(mode));

    // ── 4. Radio / network stack ──────────────────────────────
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let wifi = EspWifi::new(peripherals.modem, sysloop, Some(nvs))?;

    // ── 5. Main loop ──────────────────────────────────────────
    match mode {
        DeviceMode::Operational => {
            let mut node = RelayNode::new(relay, signal);
            let mut radio = EspNowRadio::new(wifi);
            node.start(&mut radio, time.now_ms(), &mut sink);

            info!("System ready. Entering relay loop.");
            loop {
                node.poll(&RX_MAILBOX, time.now_ms(), &mut sink);
                FreeRtos::delay_ms(config.loop_interval_ms);
            }
        }
        DeviceMode::ConfigUpdate => {
            // The relay stays de-energised for the whole update session.
            let _relay = relay;
            let mut net = WifiProvisioner::new(wifi, &config);
            let mut flow = ProvisionFlow::new(&config);
            flow.start(&mut net, &mut signal, time.now_ms(), &mut sink);

            info!("System ready. Entering update loop.");
            loop {
                let now_ms = time.now_ms();
                flow.tick(&mut net, &mut signal, now_ms, &mut sink);
                if let Err(e) = signal.tick(now_ms) {
                    warn!("Update: {}", e);
                }
                FreeRtos::delay_ms(config.loop_interval_ms);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!(
        "espnow-relay {} is device firmware; build it for an ESP-IDF target. \
         Run `cargo test` for the host-side suite.",
        env!("CARGO_PKG_VERSION")
    );
}
