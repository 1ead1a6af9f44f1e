//! pwmweb firmware main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  LedcPwm (PwmPort)   WifiAdapter (AP)   EspHttpServer    │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ────────────────   │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  DutyController (pure logic)                       │  │
//! │  │  parse · resolve · range check · set → commit      │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info};

use pwmweb::adapters::http_server;
use pwmweb::adapters::ledc::LedcPwm;
use pwmweb::adapters::wifi::{AccessPointPort, WifiAdapter};
use pwmweb::app::controller::DutyController;
use pwmweb::config::SystemConfig;
use pwmweb::drivers::hw_init;
use pwmweb::error::Error;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Starting PWM Web Server v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. PWM bring-up ───────────────────────────────────────
    let config = SystemConfig::default();
    let ledc = LedcPwm::new();
    let registry = hw_init::bring_up(&config, &ledc).inspect_err(|e| {
        error!("PWM init failed: {}, halting", e);
    })?;
    let controller = Arc::new(DutyController::new(registry, ledc));

    // ── 3. Access point + HTTP ────────────────────────────────
    // Both handles must outlive the park loop below; dropping either
    // tears the service down.
    let mut _wifi = None;
    let mut _server = None;

    if config.http_enabled {
        let peripherals = Peripherals::take()?;
        let sysloop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        let driver = BlockingWifi::wrap(
            EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
            sysloop,
        )?;
        let mut wifi = WifiAdapter::new(driver);
        wifi.start(&config.wifi).map_err(Error::from)?;

        _server = Some(http_server::start(Arc::clone(&controller))?);

        if let Some(ip) = wifi.gateway() {
            info!("Web server started. Connect to AP and navigate to http://{}/", ip);
        }
        _wifi = Some(wifi);
    } else {
        info!("HTTP disabled; outputs hold their default duty");
    }

    // ── 4. Park ───────────────────────────────────────────────
    // All further work happens on the HTTP server task.
    loop {
        std::thread::sleep(Duration::from_secs(60));
    }
}
