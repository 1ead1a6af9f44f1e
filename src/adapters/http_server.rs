//! ESP-IDF HTTP server binding.
//!
//! Registers one GET handler per route and forwards the request URI to
//! [`http::route`](crate::http::route).  `esp_http_server` runs handlers on
//! its own task; the shared [`DutyController`] is `Sync`, so no extra
//! locking happens here.

use std::sync::Arc;

use anyhow::Result;
use esp_idf_svc::http::Method;
use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::io::Write;
use log::info;

use crate::app::controller::DutyController;
use crate::app::ports::PwmPort;
use crate::http;

const ROUTES: [&str; 3] = ["/", "/set", "/status"];

/// Start the server.  Dropping the returned handle stops it.
pub fn start<P>(controller: Arc<DutyController<P>>) -> Result<EspHttpServer<'static>>
where
    P: PwmPort + Send + 'static,
{
    let mut server = EspHttpServer::new(&Configuration::default())?;

    for path in ROUTES {
        let controller = Arc::clone(&controller);
        server.fn_handler(path, Method::Get, move |req| -> Result<()> {
            let response = http::route(req.uri(), &controller);
            let headers = [("Content-Type", response.content_type)];
            let mut resp =
                req.into_response(response.status, Some(response.reason_phrase()), &headers)?;
            resp.write_all(response.body.as_bytes())?;
            Ok(())
        })?;
    }

    info!("HTTP: serving {:?}", ROUTES);
    Ok(server)
}
