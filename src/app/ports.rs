//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DutyController (domain)
//! ```
//!
//! The LEDC adapter implements [`PwmPort`].  The
//! [`DutyController`](super::controller::DutyController) consumes it via
//! generics, so the domain core never touches hardware directly.

use core::fmt;

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → LEDC peripheral)
// ───────────────────────────────────────────────────────────────

/// Write-side port onto a timer/duty-cycle peripheral.
///
/// Every method takes `&self`: the controller is shared across HTTP worker
/// threads, and each call touches only the registers of the channel it names.
///
/// Duty updates are two-phase.  [`set_duty`](Self::set_duty) stages a value
/// and [`commit_duty`](Self::commit_duty) latches it; a staged value without a
/// commit has no visible effect on the output.
pub trait PwmPort: Sync {
    /// Configure the shared timer driving every channel.
    fn configure_timer(&self, resolution_bits: u8, frequency_hz: u32) -> Result<(), PwmError>;

    /// Bind `ledc_channel` to `pin` on the shared timer.
    fn configure_channel(&self, ledc_channel: u32, pin: i32) -> Result<(), PwmError>;

    /// Stage a new duty value for `ledc_channel`.
    fn set_duty(&self, ledc_channel: u32, duty: u32) -> Result<(), PwmError>;

    /// Latch the staged duty value onto the output.
    fn commit_duty(&self, ledc_channel: u32) -> Result<(), PwmError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Platform-level failure reported by a [`PwmPort`] primitive.
///
/// Carries the raw `esp_err_t` so it can be logged verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmError {
    pub code: i32,
}

impl PwmError {
    /// `ESP_FAIL`
    pub const FAIL: Self = Self { code: -1 };
    /// `ESP_ERR_INVALID_ARG`
    pub const INVALID_ARG: Self = Self { code: 0x102 };
    /// `ESP_ERR_INVALID_STATE`
    pub const INVALID_STATE: Self = Self { code: 0x103 };

    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LEDC call failed (rc={:#x})", self.code)
    }
}
