//! GPIO / peripheral pin assignments for the PWM demo boards.
//!
//! Single source of truth: the config presets reference this module rather
//! than hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// PWM outputs
// ---------------------------------------------------------------------------

/// Output for the single-channel board, and channel 0 on the three-channel one.
pub const PWM_OUT_0_GPIO: i32 = 7;
pub const PWM_OUT_1_GPIO: i32 = 8;
pub const PWM_OUT_2_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// LEDC configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  13-bit gives 0 – 8191 duty levels.
pub const PWM_RESOLUTION_BITS: u8 = 13;
/// LEDC base frequency shared by every output.
pub const PWM_FREQ_HZ: u32 = 500;
/// Highest duty resolution the ESP32-S3 low-speed LEDC timers accept.
pub const LEDC_MAX_RESOLUTION_BITS: u8 = 14;
/// Number of low-speed LEDC channels on the ESP32-S3.
pub const LEDC_CHANNEL_COUNT: usize = 8;
