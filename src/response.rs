//! Responses as handlers build them.
//!
//! A handler may return a [`Response`] or anything that converts into one
//! through [`IntoResponse`]. `Result<Response, CustomerError>` is the usual
//! shape: the error side becomes a JSON error body.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

use crate::status::Status;

const JSON: &str = "application/json";

/// Status, headers and a fully buffered body.
///
/// ```rust
/// use customers::{Response, Status};
///
/// Response::json(&serde_json::json!({"id": 1}));
/// Response::status(Status::NoContent);
/// Response::builder()
///     .status(Status::Created)
///     .header("location", "http://localhost/customers/1")
///     .json(&serde_json::json!({"id": 1}));
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK` with `value` serialized as `application/json`.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        Self::builder().json(value)
    }

    /// Just a status; the body is empty.
    pub fn status(code: Status) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    /// JSON error body: `{"status": 404, "error": "Not Found", "message": "..."}`.
    pub fn error(code: Status, message: impl Into<String>) -> Self {
        Self::builder().status(code).json(&ErrorBody {
            status: code.code(),
            error: code.reason(),
            message: message.into(),
        })
    }

    /// Starts a `200` response that still needs headers or another status.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response type.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status.code());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(Bytes::from(self.body))).unwrap_or_else(|e| {
            error!("invalid response header: {e}");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error: &'static str,
    message: String,
}

/// Returned by [`Response::builder`]; finished by [`ResponseBuilder::json`].
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Serializes `value` and sets `content-type: application/json`.
    ///
    /// A value that fails to serialize becomes a bare `500`.
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Response {
        match serde_json::to_vec(value) {
            Ok(body) => {
                let mut headers = Vec::with_capacity(self.headers.len() + 1);
                headers.push(("content-type".to_owned(), JSON.to_owned()));
                headers.extend(self.headers);
                Response { body, headers, status: self.status }
            }
            Err(e) => {
                error!("failed to serialize response body: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}

/// Anything a handler may return.
///
/// Implement on your own error types to return `Result<_, YourError>` from
/// handlers; the error side is mapped to a status at this boundary.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::NoContent`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T, E> IntoResponse for Result<T, E>
where
    T: IntoResponse,
    E: IntoResponse,
{
    fn into_response(self) -> Response {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}
