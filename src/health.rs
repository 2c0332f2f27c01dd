//! Health-check handler.
//!
//! ```text
//! GET /health  ->  200 {"status": 200, "message": "Healthy"}
//! ```
//!
//! The check has no dependencies: if the process can answer HTTP at all, it
//! is alive.

use serde::Serialize;

use crate::request::Request;
use crate::response::Response;
use crate::state::AppState;

#[derive(Serialize)]
struct Health {
    status: u16,
    message: &'static str,
}

pub async fn check(_state: AppState, _req: Request) -> Response {
    Response::json(&Health { status: 200, message: "Healthy" })
}
