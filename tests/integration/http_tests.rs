//! Integration tests: GET URI → route → controller → mock LEDC.

use super::mock_pwm::MockPwm;

use pwmweb::app::controller::DutyController;
use pwmweb::app::registry::ChannelRegistry;
use pwmweb::config::SystemConfig;
use pwmweb::http::route;

fn make(config: &SystemConfig) -> DutyController<MockPwm> {
    DutyController::new(ChannelRegistry::new(&config.pwm), MockPwm::new())
}

#[test]
fn legacy_single_slider_url_still_works() {
    let c = make(&SystemConfig::single_channel());
    let r = route("/set?duty=4095", &c);
    assert_eq!((r.status, r.body.as_str()), (200, "OK"));
    assert_eq!(c.port().latched(0), Some(4095));
}

#[test]
fn multi_channel_set_and_status() {
    let c = make(&SystemConfig::three_channel());
    assert_eq!(route("/set?channel=2&duty=100", &c).status, 200);
    assert_eq!(route("/set?duty=7&channel=1", &c).status, 200);

    let status = route("/status", &c);
    assert_eq!(status.content_type, "application/json");
    let v: serde_json::Value = serde_json::from_str(&status.body).unwrap();
    assert_eq!(v["max_duty"], 8191);
    assert_eq!(v["channels"][0]["duty"], 0);
    assert_eq!(v["channels"][1]["duty"], 7);
    assert_eq!(v["channels"][2]["duty"], 100);
    assert_eq!(v["channels"][2]["pin"], 9);
}

#[test]
fn rejected_requests_are_400_with_reason_and_no_hardware_effect() {
    let c = make(&SystemConfig::three_channel());
    for (uri, reason) in [
        ("/set?channel=3&duty=100", "invalid channel"),
        ("/set?channel=one&duty=100", "invalid channel"),
        ("/set?channel=0&duty=8192", "duty out of range"),
        ("/set?channel=0&duty=-1", "duty out of range"),
        ("/set?channel=0&duty=", "invalid duty"),
        ("/set?channel=0", "missing duty"),
    ] {
        let r = route(uri, &c);
        assert_eq!(r.status, 400, "{uri}");
        assert_eq!(r.body, reason, "{uri}");
    }
    assert!(!c.port().hardware_touched());
}

#[test]
fn hardware_failure_surfaces_as_400() {
    let cfg = SystemConfig::single_channel();
    let c = DutyController::new(ChannelRegistry::new(&cfg.pwm), MockPwm::new().fail_commit_on(0));
    let r = route("/set?duty=1", &c);
    assert_eq!((r.status, r.body.as_str()), (400, "hardware error"));
}

#[test]
fn page_reflects_applied_duty() {
    let c = make(&SystemConfig::single_channel());
    route("/set?duty=4095", &c);
    let page = route("/", &c);
    assert!(page.body.contains("value='4095'"));
}
