//! HTTP status codes as a typed enum.
//!
//! Only the codes this service actually emits are listed. Use [`Status`]
//! anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, `Response::error()`, or as a bare handler
//! return value.
//!
//! ```rust
//! use customers::{Response, Status};
//!
//! Response::status(Status::NoContent);
//! Response::error(Status::NotFound, "Customer with id '7' was not found.");
//! ```

/// A status code the service can answer with.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnsupportedMediaType, // 415
    InternalServerError,  // 500
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok                   => 200,
            Self::Created              => 201,
            Self::NoContent            => 204,
            Self::BadRequest           => 400,
            Self::NotFound             => 404,
            Self::MethodNotAllowed     => 405,
            Self::UnsupportedMediaType => 415,
            Self::InternalServerError  => 500,
        }
    }

    /// Canonical reason phrase, used as the `error` field of JSON error bodies.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                   => "OK",
            Self::Created              => "Created",
            Self::NoContent            => "No Content",
            Self::BadRequest           => "Bad Request",
            Self::NotFound             => "Not Found",
            Self::MethodNotAllowed     => "Method Not Allowed",
            Self::UnsupportedMediaType => "Unsupported Media Type",
            Self::InternalServerError  => "Internal Server Error",
        }
    }
}

