//! LEDC adapter: implements [`PwmPort`] on the ESP32 LED-control peripheral.
//!
//! All outputs share low-speed timer 0.  LEDC channel `n` drives whatever
//! GPIO it was bound to by [`configure_channel`](PwmPort::configure_channel).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `ledc_*` sys calls.  `ledc_set_duty` only writes the
//! shadow register; `ledc_update_duty` latches it at the next PWM period.
//! On host/test: an in-memory register file that models the same
//! staged/latched split, so host tests can observe both halves.

use crate::app::ports::{PwmError, PwmPort};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
#[derive(Debug, Default)]
pub struct LedcPwm;

#[cfg(target_os = "espidf")]
impl LedcPwm {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t) -> Result<(), PwmError> {
    if ret == ESP_OK as esp_err_t {
        Ok(())
    } else {
        Err(PwmError::new(ret))
    }
}

#[cfg(target_os = "espidf")]
impl PwmPort for LedcPwm {
    fn configure_timer(&self, resolution_bits: u8, frequency_hz: u32) -> Result<(), PwmError> {
        let cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: ledc_timer_t_LEDC_TIMER_0,
            duty_resolution: resolution_bits as ledc_timer_bit_t,
            freq_hz: frequency_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: cfg outlives the call; the driver copies what it needs.
        check(unsafe { ledc_timer_config(&cfg) })
    }

    fn configure_channel(&self, ledc_channel: u32, pin: i32) -> Result<(), PwmError> {
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
            gpio_num: pin,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: as above.
        check(unsafe { ledc_channel_config(&cfg) })
    }

    fn set_duty(&self, ledc_channel: u32, duty: u32) -> Result<(), PwmError> {
        // SAFETY: per-channel register write; the driver takes its own
        // spinlock, so concurrent calls on different channels are fine.
        check(unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel, duty) })
    }

    fn commit_duty(&self, ledc_channel: u32) -> Result<(), PwmError> {
        // SAFETY: as above.
        check(unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel) })
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(not(target_os = "espidf"))]
const SIM_CHANNELS: usize = crate::pins::LEDC_CHANNEL_COUNT;

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, Default)]
struct SimChannel {
    pin: Option<i32>,
    staged: Option<u32>,
    output: u32,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
struct SimRegisters {
    timer: Option<(u8, u32)>,
    channels: [SimChannel; SIM_CHANNELS],
}

/// Simulated LEDC block.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct LedcPwm {
    regs: Mutex<SimRegisters>,
}

#[cfg(not(target_os = "espidf"))]
impl LedcPwm {
    pub fn new() -> Self {
        Self::default()
    }

    fn regs(&self) -> MutexGuard<'_, SimRegisters> {
        self.regs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `(resolution_bits, frequency_hz)` once the timer is configured.
    pub fn timer(&self) -> Option<(u8, u32)> {
        self.regs().timer
    }

    /// GPIO bound to `ledc_channel`, if configured.
    pub fn pin(&self, ledc_channel: u32) -> Option<i32> {
        self.regs().channels.get(ledc_channel as usize).and_then(|c| c.pin)
    }

    /// Duty currently visible on the output.
    pub fn output_duty(&self, ledc_channel: u32) -> Option<u32> {
        self.regs().channels.get(ledc_channel as usize).map(|c| c.output)
    }

    /// Duty written but not yet latched.
    pub fn staged_duty(&self, ledc_channel: u32) -> Option<u32> {
        self.regs().channels.get(ledc_channel as usize).and_then(|c| c.staged)
    }
}

#[cfg(not(target_os = "espidf"))]
impl PwmPort for LedcPwm {
    fn configure_timer(&self, resolution_bits: u8, frequency_hz: u32) -> Result<(), PwmError> {
        if resolution_bits == 0 || frequency_hz == 0 {
            return Err(PwmError::INVALID_ARG);
        }
        self.regs().timer = Some((resolution_bits, frequency_hz));
        log::info!("LEDC(sim): timer0 {} bits @ {} Hz", resolution_bits, frequency_hz);
        Ok(())
    }

    fn configure_channel(&self, ledc_channel: u32, pin: i32) -> Result<(), PwmError> {
        let mut regs = self.regs();
        if regs.timer.is_none() {
            return Err(PwmError::INVALID_STATE);
        }
        let ch = regs
            .channels
            .get_mut(ledc_channel as usize)
            .ok_or(PwmError::INVALID_ARG)?;
        *ch = SimChannel {
            pin: Some(pin),
            ..SimChannel::default()
        };
        Ok(())
    }

    fn set_duty(&self, ledc_channel: u32, duty: u32) -> Result<(), PwmError> {
        let mut regs = self.regs();
        let ch = regs
            .channels
            .get_mut(ledc_channel as usize)
            .ok_or(PwmError::INVALID_ARG)?;
        ch.staged = Some(duty);
        Ok(())
    }

    fn commit_duty(&self, ledc_channel: u32) -> Result<(), PwmError> {
        let mut regs = self.regs();
        let ch = regs
            .channels
            .get_mut(ledc_channel as usize)
            .ok_or(PwmError::INVALID_ARG)?;
        if let Some(duty) = ch.staged.take() {
            ch.output = duty;
        }
        Ok(())
    }
}
