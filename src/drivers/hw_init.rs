//! One-shot PWM bring-up.
//!
//! Configures the shared LEDC timer, binds every configured output to its
//! channel, and latches each channel's default duty.  Called once from
//! `main()` before the access point comes up.  Any failure here is fatal for
//! the process.

use core::fmt;

use log::info;

use crate::app::ports::PwmPort;
use crate::app::registry::ChannelRegistry;
use crate::config::{PwmConfig, SystemConfig};
use crate::error;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    TimerConfigFailed(i32),
    ChannelConfigFailed { channel: u8, code: i32 },
    InitialDutyFailed { channel: u8, code: i32 },
}

impl fmt::Display for HwInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerConfigFailed(rc) => write!(f, "LEDC timer config failed (rc={})", rc),
            Self::ChannelConfigFailed { channel, code } => {
                write!(f, "LEDC channel {} config failed (rc={})", channel, code)
            }
            Self::InitialDutyFailed { channel, code } => {
                write!(f, "LEDC channel {} initial duty failed (rc={})", channel, code)
            }
        }
    }
}

// ── LEDC PWM ─────────────────────────────────────────────────

/// Validate `config`, then run [`init_pwm`].
pub fn bring_up(config: &SystemConfig, port: &impl PwmPort) -> error::Result<ChannelRegistry> {
    config.validate()?;
    Ok(init_pwm(&config.pwm, port)?)
}

/// Bring up every configured output and return the populated registry.
///
/// `pwm` must already have passed [`SystemConfig::validate`](crate::config::SystemConfig::validate).
pub fn init_pwm(pwm: &PwmConfig, port: &impl PwmPort) -> Result<ChannelRegistry, HwInitError> {
    port.configure_timer(pwm.resolution_bits, pwm.frequency_hz)
        .map_err(|e| HwInitError::TimerConfigFailed(e.code))?;

    let registry = ChannelRegistry::new(pwm);

    for ch in registry.iter() {
        let channel = ch.index();
        port.configure_channel(ch.ledc_channel(), ch.pin())
            .map_err(|e| HwInitError::ChannelConfigFailed { channel, code: e.code })?;

        let duty = ch.last_commanded_duty();
        port.set_duty(ch.ledc_channel(), duty)
            .and_then(|()| port.commit_duty(ch.ledc_channel()))
            .map_err(|e| HwInitError::InitialDutyFailed { channel, code: e.code })?;

        info!("hw_init: channel {} → GPIO {} (duty {})", channel, ch.pin(), duty);
    }

    info!(
        "hw_init: LEDC configured ({} channel(s), {} Hz, {}-bit)",
        registry.len(),
        pwm.frequency_hz,
        pwm.resolution_bits
    );
    Ok(registry)
}
