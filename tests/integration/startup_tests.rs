//! Integration tests for LEDC bring-up against the recording mock.

use super::mock_pwm::{MockPwm, PwmCall};

use pwmweb::config::SystemConfig;
use pwmweb::drivers::hw_init::{HwInitError, bring_up, init_pwm};
use pwmweb::error::Error;

#[test]
fn configures_timer_once_then_each_channel_with_default_duty() {
    let pwm = MockPwm::new();
    let reg = init_pwm(&SystemConfig::three_channel().pwm, &pwm).unwrap();
    assert_eq!(reg.len(), 3);

    let calls = pwm.calls();
    assert_eq!(
        calls[0],
        PwmCall::ConfigureTimer { resolution_bits: 13, frequency_hz: 500 }
    );
    assert_eq!(
        calls.iter().filter(|c| matches!(c, PwmCall::ConfigureTimer { .. })).count(),
        1
    );
    for (ch, pin) in [(0u32, 7), (1, 8), (2, 9)] {
        assert_eq!(
            pwm.calls_for(ch),
            vec![
                PwmCall::ConfigureChannel { channel: ch, pin },
                PwmCall::SetDuty { channel: ch, duty: 0 },
                PwmCall::CommitDuty { channel: ch },
            ]
        );
    }
}

#[test]
fn single_channel_latches_ten_percent() {
    let pwm = MockPwm::new();
    let reg = init_pwm(&SystemConfig::single_channel().pwm, &pwm).unwrap();
    assert_eq!(pwm.latched(0), Some(819));
    assert_eq!(reg.last_commanded_duty(0), Some(819));
}

#[test]
fn timer_failure_is_fatal() {
    let pwm = MockPwm::new().fail_timer();
    let err = init_pwm(&SystemConfig::single_channel().pwm, &pwm).unwrap_err();
    assert_eq!(err, HwInitError::TimerConfigFailed(-1));
    assert_eq!(pwm.calls().len(), 1);
}

#[test]
fn initial_duty_failure_names_the_channel() {
    let pwm = MockPwm::new().fail_commit_on(1);
    let err = init_pwm(&SystemConfig::three_channel().pwm, &pwm).unwrap_err();
    assert_eq!(err, HwInitError::InitialDutyFailed { channel: 1, code: -1 });
}

#[test]
fn bring_up_validates_first() {
    let pwm = MockPwm::new();
    let mut cfg = SystemConfig::single_channel();
    cfg.pwm.channels[0].default_duty = 9000;
    assert!(matches!(bring_up(&cfg, &pwm), Err(Error::Config(_))));
    assert!(pwm.calls().is_empty());
}
