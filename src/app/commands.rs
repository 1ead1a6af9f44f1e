//! Inbound duty commands and their outcomes.
//!
//! A [`DutyCommand`] is what an adapter (HTTP, serial, tests) hands to the
//! [`DutyController`](super::controller::DutyController).  It lives only for
//! the duration of one request.

use core::fmt;

/// A parsed but not yet validated duty request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DutyCommand {
    pub channel_index: u32,
    /// Signed so that a negative integer survives parsing and is rejected
    /// by the range check rather than as unparseable text.
    pub requested_duty: i64,
}

impl DutyCommand {
    /// Strictly parse the two decimal fields.
    ///
    /// Surrounding whitespace is ignored.  The channel must be a base-10
    /// `u32`; the duty may be any base-10 `i64`, negative included.  Empty
    /// text, overflow and trailing junk are rejected rather than coerced
    /// to zero.
    pub fn parse(raw_channel: &str, raw_duty: &str) -> Result<Self, RejectReason> {
        let channel_index = parse_decimal(raw_channel).ok_or(RejectReason::InvalidChannel)?;
        let requested_duty = parse_decimal(raw_duty).ok_or(RejectReason::InvalidDuty)?;
        Ok(Self {
            channel_index,
            requested_duty,
        })
    }
}

fn parse_decimal<T: core::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim_ascii().parse().ok()
}

/// Outcome of one duty command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The duty was staged and latched on the hardware.
    Applied { channel: u8, duty: u32 },
    /// Nothing was latched; the reason says why.
    Rejected(RejectReason),
}

impl CommandResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Why a command never reached (or failed at) the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Channel text did not parse, or names no registered channel.
    InvalidChannel,
    /// Duty text is not a base-10 integer.
    InvalidDuty,
    /// Duty parsed but is negative or exceeds the channel's resolution.
    DutyOutOfRange,
    /// The peripheral reported failure on set or commit.
    Hardware,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel => write!(f, "invalid channel"),
            Self::InvalidDuty => write!(f, "invalid duty"),
            Self::DutyOutOfRange => write!(f, "duty out of range"),
            Self::Hardware => write!(f, "hardware error"),
        }
    }
}
