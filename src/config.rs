//! System configuration parameters
//!
//! Everything the firmware needs at startup: the LEDC timer settings, the
//! list of PWM outputs, and the access-point credentials.  Fixed for the
//! lifetime of the process; nothing here is reloadable.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::pins;

/// Upper bound on configured outputs (one per LEDC low-speed channel).
pub const MAX_CHANNELS: usize = pins::LEDC_CHANNEL_COUNT;

/// Largest duty value addressable at `resolution_bits`.
///
/// Saturates at `u32::MAX` for 32 bits and above; such widths never pass
/// [`SystemConfig::validate`].
pub const fn max_duty(resolution_bits: u8) -> u32 {
    match 1u32.checked_shl(resolution_bits as u32) {
        Some(levels) => levels - 1,
        None => u32::MAX,
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub pwm: PwmConfig,
    pub wifi: ApConfig,
    /// Bring up the access point and HTTP control endpoint.
    /// `false` gives the PWM-only variant.
    pub http_enabled: bool,
}

/// LEDC timer and channel layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PwmConfig {
    /// Timer frequency in Hz, shared by every channel.
    pub frequency_hz: u32,
    /// Duty resolution in bits.  13 bits → duty range 0 – 8191.
    pub resolution_bits: u8,
    /// Outputs in channel-index order: entry `i` becomes channel `i`.
    pub channels: heapless::Vec<ChannelConfig, MAX_CHANNELS>,
}

/// One PWM output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub pin: i32,
    /// Duty applied at startup, before any request arrives.
    pub default_duty: u32,
}

/// Soft-AP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApConfig {
    pub ssid: heapless::String<32>,
    /// Empty for an open network, otherwise 8 – 64 bytes (WPA2).
    pub password: heapless::String<64>,
    pub max_connections: u16,
    pub channel: u8,
}

impl PwmConfig {
    pub const fn max_duty(&self) -> u32 {
        max_duty(self.resolution_bits)
    }
}

impl Default for ApConfig {
    fn default() -> Self {
        Self {
            ssid: bounded("ESP32_PWM_AP"),
            password: bounded("12345678"),
            max_connections: 4,
            channel: 1,
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::single_channel()
    }
}

impl SystemConfig {
    /// One output on GPIO 7, starting at 10% duty.
    pub fn single_channel() -> Self {
        let ten_percent = max_duty(pins::PWM_RESOLUTION_BITS) / 10;
        Self {
            pwm: PwmConfig {
                frequency_hz: pins::PWM_FREQ_HZ,
                resolution_bits: pins::PWM_RESOLUTION_BITS,
                channels: [ChannelConfig { pin: pins::PWM_OUT_0_GPIO, default_duty: ten_percent }]
                    .into_iter()
                    .collect(),
            },
            wifi: ApConfig::default(),
            http_enabled: true,
        }
    }

    /// Three outputs on GPIO 7/8/9, all starting dark.
    pub fn three_channel() -> Self {
        let mut config = Self::single_channel();
        config.pwm.channels = [pins::PWM_OUT_0_GPIO, pins::PWM_OUT_1_GPIO, pins::PWM_OUT_2_GPIO]
            .into_iter()
            .map(|pin| ChannelConfig { pin, default_duty: 0 })
            .collect();
        config
    }

    /// Range-check everything the LEDC bring-up depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pwm = &self.pwm;
        if pwm.resolution_bits == 0 || pwm.resolution_bits > pins::LEDC_MAX_RESOLUTION_BITS {
            return Err(ConfigError::InvalidResolution(pwm.resolution_bits));
        }
        if pwm.frequency_hz == 0 {
            return Err(ConfigError::InvalidFrequency);
        }
        if pwm.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        for (i, ch) in pwm.channels.iter().enumerate() {
            if pwm.channels[..i].iter().any(|other| other.pin == ch.pin) {
                return Err(ConfigError::DuplicatePin(ch.pin));
            }
            if ch.default_duty > pwm.max_duty() {
                return Err(ConfigError::DefaultDutyOutOfRange { index: i as u8 });
            }
        }
        Ok(())
    }
}

/// Copy `s` into a fixed-capacity string; left empty if it does not fit.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    let _ = out.push_str(s);
    out
}

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidResolution(u8),
    InvalidFrequency,
    NoChannels,
    DuplicatePin(i32),
    DefaultDutyOutOfRange { index: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution(bits) => {
                write!(f, "duty resolution {} bits outside 1-{}", bits, pins::LEDC_MAX_RESOLUTION_BITS)
            }
            Self::InvalidFrequency => write!(f, "PWM frequency must be non-zero"),
            Self::NoChannels => write!(f, "no PWM channels configured"),
            Self::DuplicatePin(pin) => write!(f, "GPIO {} assigned to more than one channel", pin),
            Self::DefaultDutyOutOfRange { index } => {
                write!(f, "default duty for channel {} exceeds resolution", index)
            }
        }
    }
}
