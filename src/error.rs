//! Unified error type for startup.
//!
//! Request-level failures never get here: they end as a
//! [`RejectReason`](crate::app::commands::RejectReason) at the HTTP boundary.
//! This enum covers the bring-up path, where every failure is fatal and
//! `main` logs it and returns.

use core::fmt;

use crate::adapters::wifi::ConnectivityError;
use crate::config::ConfigError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration failed validation.
    Config(ConfigError),
    /// LEDC bring-up failed.
    Init(HwInitError),
    /// The access point could not be started.
    Comms(ConnectivityError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<ConnectivityError> for Error {
    fn from(e: ConnectivityError) -> Self {
        Self::Comms(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
