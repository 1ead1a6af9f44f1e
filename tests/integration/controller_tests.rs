//! Integration tests for the text → validation → set/commit pipeline.

use super::mock_pwm::{MockPwm, PwmCall};

use pwmweb::app::commands::{CommandResult, RejectReason};
use pwmweb::app::controller::DutyController;
use pwmweb::app::registry::ChannelRegistry;
use pwmweb::config::SystemConfig;

fn make(config: &SystemConfig, pwm: MockPwm) -> DutyController<MockPwm> {
    DutyController::new(ChannelRegistry::new(&config.pwm), pwm)
}

fn three() -> DutyController<MockPwm> {
    make(&SystemConfig::three_channel(), MockPwm::new())
}

// ── Concrete scenarios ────────────────────────────────────────

#[test]
fn three_channel_scenario() {
    let c = three();
    assert_eq!(c.handle("0", "819"), CommandResult::Applied { channel: 0, duty: 819 });
    assert_eq!(c.handle("1", "8191"), CommandResult::Applied { channel: 1, duty: 8191 });
    assert_eq!(
        c.handle("2", "8192"),
        CommandResult::Rejected(RejectReason::DutyOutOfRange)
    );
    assert_eq!(
        c.handle("5", "0"),
        CommandResult::Rejected(RejectReason::InvalidChannel)
    );
}

#[test]
fn single_channel_half_duty() {
    let c = make(&SystemConfig::single_channel(), MockPwm::new());
    assert_eq!(c.handle("0", "4095"), CommandResult::Applied { channel: 0, duty: 4095 });
    assert_eq!(c.port().latched(0), Some(4095));
}

// ── Two-phase protocol ────────────────────────────────────────

#[test]
fn applied_is_exactly_set_then_commit() {
    let c = three();
    c.handle("2", "100");
    assert_eq!(
        c.port().calls(),
        vec![
            PwmCall::SetDuty { channel: 2, duty: 100 },
            PwmCall::CommitDuty { channel: 2 },
        ]
    );
}

#[test]
fn boundaries_are_inclusive() {
    let c = three();
    assert!(c.handle("0", "0").is_applied());
    assert!(c.handle("0", "8191").is_applied());
    assert_eq!(c.registry().last_commanded_duty(0), Some(8191));
}

// ── Rejections never reach hardware ───────────────────────────

#[test]
fn out_of_range_never_touches_hardware() {
    let c = three();
    for d in ["8192", "10000", "4294967295"] {
        assert_eq!(c.handle("1", d), CommandResult::Rejected(RejectReason::DutyOutOfRange));
    }
    assert!(!c.port().hardware_touched());
    assert_eq!(c.registry().last_commanded_duty(1), Some(0));
}

#[test]
fn unregistered_channel_never_touches_hardware() {
    let c = three();
    assert_eq!(c.handle("3", "100"), CommandResult::Rejected(RejectReason::InvalidChannel));
    assert!(!c.port().hardware_touched());
}

#[test]
fn malformed_text_is_rejected_not_defaulted() {
    let c = three();
    assert_eq!(c.handle("abc", "100"), CommandResult::Rejected(RejectReason::InvalidChannel));
    assert_eq!(c.handle("", "100"), CommandResult::Rejected(RejectReason::InvalidChannel));
    assert_eq!(c.handle("0", "abc"), CommandResult::Rejected(RejectReason::InvalidDuty));
    assert_eq!(c.handle("0", ""), CommandResult::Rejected(RejectReason::InvalidDuty));
    assert_eq!(c.handle("0", "1.5"), CommandResult::Rejected(RejectReason::InvalidDuty));
    assert!(!c.port().hardware_touched());
}

#[test]
fn negative_duty_is_out_of_range_not_malformed() {
    let c = three();
    for d in ["-1", "-8192", " -4095 "] {
        assert_eq!(c.handle("0", d), CommandResult::Rejected(RejectReason::DutyOutOfRange), "{d}");
    }
    assert!(!c.port().hardware_touched());
    assert_eq!(c.registry().last_commanded_duty(0), Some(0));
}

#[test]
fn unregistered_channel_wins_over_negative_duty() {
    let c = three();
    assert_eq!(c.handle("5", "-1"), CommandResult::Rejected(RejectReason::InvalidChannel));
}

// ── Hardware failures ─────────────────────────────────────────

#[test]
fn set_failure_skips_commit_and_bookkeeping() {
    let c = make(&SystemConfig::three_channel(), MockPwm::new().fail_set_on(1));
    assert_eq!(c.handle("1", "500"), CommandResult::Rejected(RejectReason::Hardware));
    assert_eq!(c.port().calls(), vec![PwmCall::SetDuty { channel: 1, duty: 500 }]);
    assert_eq!(c.registry().last_commanded_duty(1), Some(0));
}

#[test]
fn commit_failure_is_hardware_error() {
    let c = make(&SystemConfig::three_channel(), MockPwm::new().fail_commit_on(0));
    assert_eq!(c.handle("0", "500"), CommandResult::Rejected(RejectReason::Hardware));
    assert_eq!(c.registry().last_commanded_duty(0), Some(0));
    assert_eq!(c.port().latched(0), None);
}

#[test]
fn hardware_failure_on_one_channel_leaves_others_working() {
    let c = make(&SystemConfig::three_channel(), MockPwm::new().fail_set_on(1));
    assert!(!c.handle("1", "500").is_applied());
    assert!(c.handle("2", "500").is_applied());
    assert!(!c.handle("1", "1").is_applied());
    assert!(c.handle("0", "1").is_applied());
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeating_a_command_gives_same_output() {
    let c = three();
    c.handle("1", "1234");
    let once = c.port().latched(1);
    c.handle("1", "1234");
    assert_eq!(c.port().latched(1), once);
    assert_eq!(c.registry().last_commanded_duty(1), Some(1234));
}

// ── Concurrency ───────────────────────────────────────────────

#[test]
fn parallel_requests_on_distinct_channels_do_not_interfere() {
    let c = three();
    std::thread::scope(|s| {
        for ch in 0..3u32 {
            let c = &c;
            s.spawn(move || {
                for d in 0..200u32 {
                    let duty = ch * 1000 + d;
                    let r = c.handle(&ch.to_string(), &duty.to_string());
                    assert_eq!(r, CommandResult::Applied { channel: ch as u8, duty });
                }
            });
        }
    });
    for ch in 0..3u32 {
        assert_eq!(c.registry().last_commanded_duty(ch as u8), Some(ch * 1000 + 199));
        assert_eq!(c.port().latched(ch), Some(ch * 1000 + 199));

        // Each channel's history is still strictly set/commit pairs.
        let calls = c.port().calls_for(ch);
        assert_eq!(calls.len(), 400);
        for pair in calls.chunks(2) {
            assert!(matches!(pair[0], PwmCall::SetDuty { .. }));
            assert_eq!(pair[1], PwmCall::CommitDuty { channel: ch });
        }
    }
}
