//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `ledc`         | PwmPort            | ESP32 LEDC timer/channels|
//! | `wifi`         | AccessPointPort    | ESP-IDF WiFi soft-AP     |
//! | `http_server`  | -                  | esp_http_server          |

#[cfg(target_os = "espidf")]
pub mod http_server;
pub mod ledc;
pub(super) mod utils;
pub mod wifi;
