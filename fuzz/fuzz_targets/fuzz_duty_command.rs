//! Fuzz target: `DutyController::handle`
//!
//! Splits the input at the first NUL into channel and duty text.  A result
//! of `Applied` must agree with a plain decimal parse of both halves;
//! anything else must leave the outputs untouched.
//!
//! cargo fuzz run fuzz_duty_command

#![no_main]

use libfuzzer_sys::fuzz_target;
use pwmweb::adapters::ledc::LedcPwm;
use pwmweb::app::commands::CommandResult;
use pwmweb::app::controller::DutyController;
use pwmweb::app::registry::ChannelRegistry;
use pwmweb::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let (raw_channel, raw_duty) = text.split_once('\0').unwrap_or((text, ""));

    let cfg = SystemConfig::three_channel();
    let controller = DutyController::new(ChannelRegistry::new(&cfg.pwm), LedcPwm::new());

    match controller.handle(raw_channel, raw_duty) {
        CommandResult::Applied { channel, duty } => {
            assert_eq!(raw_channel.trim_ascii().parse::<u32>().ok(), Some(channel as u32));
            assert_eq!(raw_duty.trim_ascii().parse::<u32>().ok(), Some(duty));
            assert_eq!(controller.port().output_duty(channel as u32), Some(duty));
        }
        CommandResult::Rejected(_) => {
            for ch in 0..3 {
                assert_eq!(controller.port().output_duty(ch), Some(0));
            }
        }
    }
});
