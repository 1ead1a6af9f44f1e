//! Duty command handler: untrusted text in, one latched duty (or nothing) out.
//!
//! ```text
//!  "1","4095" ──▶ parse ──▶ resolve ──▶ range check ──▶ set ──▶ commit ──▶ Applied
//!                   │          │             │            │        │
//!                   └──────────┴─────────────┴────────────┴────────┴──▶ Rejected
//! ```
//!
//! [`DutyController`] is `Sync` and is shared behind an `Arc` by every HTTP
//! worker.  It holds no lock: each request touches only its own channel's
//! registers and its own atomic in the [`ChannelRegistry`].  Two requests for
//! the *same* channel may interleave; whichever commit lands last wins.

use embedded_hal::pwm::{ErrorKind, ErrorType, SetDutyCycle};
use log::{info, warn};

use super::commands::{CommandResult, DutyCommand, RejectReason};
use super::ports::PwmPort;
use super::registry::ChannelRegistry;

pub struct DutyController<P: PwmPort> {
    registry: ChannelRegistry,
    port: P,
}

impl<P: PwmPort> DutyController<P> {
    pub fn new(registry: ChannelRegistry, port: P) -> Self {
        Self { registry, port }
    }

    /// Parse, validate and apply one command given as raw decimal text.
    pub fn handle(&self, raw_channel: &str, raw_duty: &str) -> CommandResult {
        match DutyCommand::parse(raw_channel, raw_duty) {
            Ok(cmd) => self.apply(cmd),
            Err(reason) => {
                warn!(
                    "Duty command rejected: {} (channel={:?} duty={:?})",
                    reason, raw_channel, raw_duty
                );
                CommandResult::Rejected(reason)
            }
        }
    }

    /// Validate an already-parsed command and, if it passes, latch it.
    pub fn apply(&self, cmd: DutyCommand) -> CommandResult {
        match self.try_apply(cmd) {
            Ok((channel, duty)) => CommandResult::Applied { channel, duty },
            Err(reason) => {
                warn!(
                    "Duty command rejected: {} (channel={} duty={})",
                    reason, cmd.channel_index, cmd.requested_duty
                );
                CommandResult::Rejected(reason)
            }
        }
    }

    fn try_apply(&self, cmd: DutyCommand) -> Result<(u8, u32), RejectReason> {
        let channel = self
            .registry
            .resolve(cmd.channel_index)
            .map_err(|_| RejectReason::InvalidChannel)?;

        let max = channel.max_duty();
        let duty = u32::try_from(cmd.requested_duty)
            .ok()
            .filter(|&d| d <= max)
            .ok_or(RejectReason::DutyOutOfRange)?;

        // Staged value is invisible until committed; never reorder these.
        let ledc = channel.ledc_channel();
        self.port.set_duty(ledc, duty).map_err(|e| {
            warn!("LEDC set_duty on channel {} failed: {}", channel.index(), e);
            RejectReason::Hardware
        })?;
        self.port.commit_duty(ledc).map_err(|e| {
            warn!("LEDC commit_duty on channel {} failed: {}", channel.index(), e);
            RejectReason::Hardware
        })?;

        self.registry.record_applied(channel.index(), duty);
        info!(
            "Duty cycle set to {} ({:.2}%) on channel {}",
            duty,
            duty as f32 / max as f32 * 100.0,
            channel.index()
        );
        Ok((channel.index(), duty))
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// An `embedded-hal` view of one channel, for drivers written against
    /// [`SetDutyCycle`].  `None` if `index` is not registered.
    ///
    /// `max_duty_cycle` saturates at `u16::MAX` for resolutions above
    /// 16 bits, so the view then covers only the low part of the range.
    pub fn channel(&self, index: u8) -> Option<ChannelPwm<'_, P>> {
        self.registry
            .resolve(index as u32)
            .ok()
            .map(|ch| ChannelPwm {
                controller: self,
                index,
                max_duty: u16::try_from(ch.max_duty()).unwrap_or(u16::MAX),
            })
    }
}

// ───────────────────────────────────────────────────────────────
// embedded-hal bridge
// ───────────────────────────────────────────────────────────────

/// A single registered channel exposed as an `embedded_hal::pwm` output.
///
/// Every write still goes through the controller's validate → set → commit
/// path, so the registry bookkeeping stays accurate.
pub struct ChannelPwm<'a, P: PwmPort> {
    controller: &'a DutyController<P>,
    index: u8,
    max_duty: u16,
}

impl embedded_hal::pwm::Error for RejectReason {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl<P: PwmPort> ErrorType for ChannelPwm<'_, P> {
    type Error = RejectReason;
}

impl<P: PwmPort> SetDutyCycle for ChannelPwm<'_, P> {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let cmd = DutyCommand {
            channel_index: self.index as u32,
            requested_duty: i64::from(duty),
        };
        match self.controller.apply(cmd) {
            CommandResult::Applied { .. } => Ok(()),
            CommandResult::Rejected(reason) => Err(reason),
        }
    }
}
