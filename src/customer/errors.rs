use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

// ============================================================================
// Customer Request Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer with id '{0}' was not found.")]
    NotFound(String),

    #[error("Invalid Customer: {0}")]
    InvalidCustomer(String),

    #[error("Please provide only one filter: email, email_contains, or domain")]
    ConflictingFilters,

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid domain format: {0}")]
    InvalidDomain(String),

    #[error("Content-Type must be {0}")]
    UnsupportedMediaType(&'static str),

    /// A write the database refused; the transaction was rolled back.
    /// `reason` is what the client sees, `source` only reaches the log.
    #[error("Invalid Customer: {reason}")]
    Rejected {
        reason: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl CustomerError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::UnsupportedMediaType(_) => Status::UnsupportedMediaType,
            Self::Database(_) => Status::InternalServerError,
            Self::InvalidCustomer(_)
            | Self::ConflictingFilters
            | Self::InvalidEmail(_)
            | Self::InvalidDomain(_)
            | Self::Rejected { .. } => Status::BadRequest,
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("{self}");
            return Response::error(status, "An internal error occurred");
        }
        Response::error(status, self.to_string())
    }
}
