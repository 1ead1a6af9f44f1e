//! Channel registry: the fixed index → output mapping.
//!
//! Built once at startup from [`PwmConfig`] and never resized.  The only
//! mutable state is each channel's last commanded duty, kept in an atomic so
//! concurrent requests for different channels never contend.

use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{self, PwmConfig};

/// One registered PWM output.
#[derive(Debug)]
pub struct Channel {
    index: u8,
    pin: i32,
    ledc_channel: u32,
    resolution_bits: u8,
    last_commanded_duty: AtomicU32,
}

impl Channel {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Hardware channel number handed to the [`PwmPort`](super::ports::PwmPort).
    pub fn ledc_channel(&self) -> u32 {
        self.ledc_channel
    }

    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// Largest duty this channel accepts.
    pub fn max_duty(&self) -> u32 {
        config::max_duty(self.resolution_bits)
    }

    pub fn last_commanded_duty(&self) -> u32 {
        self.last_commanded_duty.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    NotFound,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "channel not registered"),
        }
    }
}

#[derive(Debug)]
pub struct ChannelRegistry {
    channels: heapless::Vec<Channel, { config::MAX_CHANNELS }>,
    resolution_bits: u8,
}

impl ChannelRegistry {
    /// Register every configured output.  Entry `i` becomes channel `i` on
    /// LEDC channel `i`.  Run [`SystemConfig::validate`](crate::config::SystemConfig::validate)
    /// first; an unvalidated resolution only widens the accepted duty range.
    pub fn new(pwm: &PwmConfig) -> Self {
        let channels = pwm
            .channels
            .iter()
            .enumerate()
            .map(|(i, ch)| Channel {
                index: i as u8,
                pin: ch.pin,
                ledc_channel: i as u32,
                resolution_bits: pwm.resolution_bits,
                last_commanded_duty: AtomicU32::new(ch.default_duty),
            })
            .collect();
        Self {
            channels,
            resolution_bits: pwm.resolution_bits,
        }
    }

    /// Constant-time lookup; no side effects.
    pub fn resolve(&self, index: u32) -> Result<&Channel, RegistryError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.channels.get(i))
            .ok_or(RegistryError::NotFound)
    }

    /// Bookkeeping only; the caller has already validated `duty`.
    /// Unknown indices are ignored.
    pub fn record_applied(&self, index: u8, duty: u32) {
        if let Some(ch) = self.channels.get(index as usize) {
            ch.last_commanded_duty.store(duty, Ordering::Relaxed);
        }
    }

    pub fn last_commanded_duty(&self, index: u8) -> Option<u32> {
        self.channels.get(index as usize).map(Channel::last_commanded_duty)
    }

    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    pub fn max_duty(&self) -> u32 {
        config::max_duty(self.resolution_bits)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }
}
