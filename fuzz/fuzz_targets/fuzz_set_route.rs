//! Fuzz target: `http::route`
//!
//! Drives arbitrary URIs through the router against the simulated LEDC
//! block and asserts that it never panics, only answers with known status
//! codes, and never latches a duty above the 13-bit range.
//!
//! cargo fuzz run fuzz_set_route

#![no_main]

use libfuzzer_sys::fuzz_target;
use pwmweb::adapters::ledc::LedcPwm;
use pwmweb::app::controller::DutyController;
use pwmweb::app::registry::ChannelRegistry;
use pwmweb::config::SystemConfig;
use pwmweb::http::route;

fuzz_target!(|data: &[u8]| {
    let Ok(uri) = core::str::from_utf8(data) else {
        return;
    };
    let cfg = SystemConfig::three_channel();
    let controller = DutyController::new(ChannelRegistry::new(&cfg.pwm), LedcPwm::new());

    let response = route(uri, &controller);
    assert!(matches!(response.status, 200 | 400 | 404), "unexpected status");

    for ch in 0..3 {
        let duty = controller.port().output_duty(ch).unwrap_or(0);
        assert!(duty <= cfg.pwm.max_duty(), "latched duty exceeds resolution");
    }
});
