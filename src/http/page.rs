//! Control page and status report rendering.

use core::fmt::Write;

use serde::Serialize;

use crate::app::registry::ChannelRegistry;

const PAGE_HEAD: &str = "<!DOCTYPE html>\
<html>\
<head><title>PWM Controller</title></head>\
<body>\
<h1>Adjust PWM Duty Cycle</h1>";

/// One slider per registered channel, each starting at its last commanded duty.
pub fn render_page(registry: &ChannelRegistry) -> String {
    let max = registry.max_duty();
    let mut html = String::with_capacity(512 + 256 * registry.len());
    html.push_str(PAGE_HEAD);

    for ch in registry.iter() {
        let i = ch.index();
        let duty = ch.last_commanded_duty();
        let _ = write!(
            html,
            "<p>Channel {i} (GPIO {pin})</p>\
             <input type='range' min='0' max='{max}' value='{duty}' id='ch{i}' \
             oninput='updateDuty({i}, this.value)'/>\
             <p>Duty Cycle: <span id='pct{i}'>{pct:.2}%</span></p>",
            pin = ch.pin(),
            pct = percent(duty, max),
        );
    }

    let _ = write!(
        html,
        "<script>\
         function updateDuty(ch, val) {{\
           var xhr = new XMLHttpRequest();\
           xhr.open('GET', '/set?channel=' + ch + '&duty=' + val, true);\
           xhr.send();\
           document.getElementById('pct' + ch).innerText = (val / {max} * 100).toFixed(2) + '%';\
         }}\
         </script>\
         </body>\
         </html>"
    );
    html
}

fn percent(duty: u32, max: u32) -> f32 {
    duty as f32 / max as f32 * 100.0
}

#[derive(Debug, Serialize)]
struct StatusReport {
    resolution_bits: u8,
    max_duty: u32,
    channels: Vec<ChannelStatus>,
}

#[derive(Debug, Serialize)]
struct ChannelStatus {
    index: u8,
    pin: i32,
    duty: u32,
}

/// JSON snapshot of every channel's last commanded duty.
pub fn render_status(registry: &ChannelRegistry) -> Result<String, serde_json::Error> {
    let report = StatusReport {
        resolution_bits: registry.resolution_bits(),
        max_duty: registry.max_duty(),
        channels: registry
            .iter()
            .map(|ch| ChannelStatus {
                index: ch.index(),
                pin: ch.pin(),
                duty: ch.last_commanded_duty(),
            })
            .collect(),
    };
    serde_json::to_string(&report)
}
