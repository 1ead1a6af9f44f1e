//! HTTP routing: request URI in, status + body out.
//!
//! Pure and transport-agnostic: the ESP-IDF server binding in
//! [`adapters::http_server`](crate::adapters::http_server) only copies the
//! URI in and the [`HttpResponse`] out.  Host tests drive [`route`] directly.
//!
//! | Path      | Response                                              |
//! |-----------|-------------------------------------------------------|
//! | `/`       | control page, one slider per channel                  |
//! | `/set`    | `OK`, or 400 with the rejection reason                |
//! | `/status` | JSON with every channel's last commanded duty         |

pub mod page;
pub mod query;

use crate::app::commands::CommandResult;
use crate::app::controller::DutyController;
use crate::app::ports::PwmPort;

/// Channel assumed when `/set` carries only `duty`, as the single-slider
/// page of earlier firmware did.
pub const DEFAULT_CHANNEL: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn ok(content_type: &'static str, body: String) -> Self {
        Self { status: 200, content_type, body }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self { status, content_type: "text/plain", body: body.into() }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

/// Dispatch one GET request.
pub fn route<P: PwmPort>(uri: &str, controller: &DutyController<P>) -> HttpResponse {
    let (path, query) = query::split_uri(uri);
    match path {
        "/" => HttpResponse::ok("text/html", page::render_page(controller.registry())),
        "/set" => set_duty(query, controller),
        "/status" => match page::render_status(controller.registry()) {
            Ok(json) => HttpResponse::ok("application/json", json),
            Err(e) => {
                log::error!("status serialisation failed: {}", e);
                HttpResponse::text(500, "internal error")
            }
        },
        _ => HttpResponse::text(404, "not found"),
    }
}

fn set_duty<P: PwmPort>(query: Option<&str>, controller: &DutyController<P>) -> HttpResponse {
    let Some(query) = query else {
        return HttpResponse::text(400, "missing query");
    };
    let Some(duty) = query::query_value(query, "duty") else {
        return HttpResponse::text(400, "missing duty");
    };
    let channel = query::query_value(query, "channel").unwrap_or(DEFAULT_CHANNEL);

    match controller.handle(channel, duty) {
        CommandResult::Applied { .. } => HttpResponse::text(200, "OK"),
        CommandResult::Rejected(reason) => HttpResponse::text(400, reason.to_string()),
    }
}
