//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements   | Connects to                     |
//! |-----------------|--------------|---------------------------------|
//! | `espnow`        | RadioPort    | ESP-NOW receive callback        |
//! | `log_sink`      | EventSink    | Serial log output               |
//! | `ota`           |:            | esp-ota partition writer        |
//! | `time`          |:            | ESP32 high-resolution timer     |
//! | `update_server` |:            | ESP-IDF HTTP server             |
//! | `wifi`          | NetworkPort  | ESP-IDF Wi-Fi STA / AP          |

pub mod espnow;
pub mod log_sink;
pub mod ota;
pub mod time;
pub mod update_server;
pub mod wifi;
