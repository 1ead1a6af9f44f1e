//! WiFi soft-AP adapter.
//!
//! Implements [`AccessPointPort`], the hexagonal boundary for bringing up
//! the access point that browsers join to reach the control page.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation stubs for host-side tests.

use core::fmt;
use core::net::Ipv4Addr;

use log::{error, info};

use super::utils::is_printable_ascii;
use crate::config::ApConfig;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AuthMethod, BlockingWifi, Configuration, EspWifi,
};

// ───────────────────────────────────────────────────────────────
// Port trait
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    AlreadyRunning,
    /// The driver refused configuration or start (raw `esp_err_t`).
    StartFailed(i32),
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::AlreadyRunning => write!(f, "access point already running"),
            Self::StartFailed(rc) => write!(f, "access point start failed (rc={})", rc),
        }
    }
}

pub trait AccessPointPort {
    fn start(&mut self, config: &ApConfig) -> Result<(), ConnectivityError>;
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    /// Address clients browse to once the AP is up.
    fn gateway(&self) -> Option<Ipv4Addr>;
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 {
        return Err(ConnectivityError::InvalidSsid);
    }
    if !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApState {
    Stopped,
    Running,
    Failed,
}

pub struct WifiAdapter {
    state: ApState,
    gateway: Option<Ipv4Addr>,
    #[cfg(target_os = "espidf")]
    driver: BlockingWifi<EspWifi<'static>>,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(driver: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            state: ApState::Stopped,
            gateway: None,
            driver,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            state: ApState::Stopped,
            gateway: None,
        }
    }

    pub fn state(&self) -> ApState {
        self.state
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_start(&mut self, config: &ApConfig) -> Result<Ipv4Addr, ConnectivityError> {
        let fail = |e: esp_idf_svc::sys::EspError| ConnectivityError::StartFailed(e.code());

        let auth_method = if config.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let cfg = Configuration::AccessPoint(AccessPointConfiguration {
            ssid: config.ssid.clone(),
            password: config.password.clone(),
            auth_method,
            max_connections: config.max_connections,
            channel: config.channel,
            ..Default::default()
        });

        self.driver.set_configuration(&cfg).map_err(fail)?;
        self.driver.start().map_err(fail)?;
        self.driver.wait_netif_up().map_err(fail)?;

        let ip_info = self.driver.wifi().ap_netif().get_ip_info().map_err(fail)?;
        Ok(ip_info.ip)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_start(&mut self, config: &ApConfig) -> Result<Ipv4Addr, ConnectivityError> {
        info!("WiFi(sim): AP '{}' up (max {} clients)", config.ssid, config.max_connections);
        Ok(Ipv4Addr::new(192, 168, 4, 1))
    }

    #[cfg(target_os = "espidf")]
    fn platform_stop(&mut self) {
        if let Err(e) = self.driver.stop() {
            error!("WiFi: AP stop failed: {}", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_stop(&mut self) {
        info!("WiFi(sim): AP stopped");
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// AccessPointPort
// ───────────────────────────────────────────────────────────────

impl AccessPointPort for WifiAdapter {
    fn start(&mut self, config: &ApConfig) -> Result<(), ConnectivityError> {
        if self.state == ApState::Running {
            return Err(ConnectivityError::AlreadyRunning);
        }
        validate_ssid(&config.ssid)?;
        validate_password(&config.password)?;

        match self.platform_start(config) {
            Ok(ip) => {
                self.state = ApState::Running;
                self.gateway = Some(ip);
                info!(
                    "WiFi: AP initialized. SSID: {}, Password: {}",
                    config.ssid, config.password
                );
                Ok(())
            }
            Err(e) => {
                error!("WiFi: AP start failed: {}", e);
                self.state = ApState::Failed;
                Err(e)
            }
        }
    }

    fn stop(&mut self) {
        self.platform_stop();
        self.state = ApState::Stopped;
        self.gateway = None;
    }

    fn is_running(&self) -> bool {
        self.state == ApState::Running
    }

    fn gateway(&self) -> Option<Ipv4Addr> {
        self.gateway
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
