//! Unified infrastructure error type.

/// The error type returned by the service's fallible startup and serving
/// operations.
///
/// Request-level failures (404, 415, etc.) are expressed as HTTP responses via
/// [`CustomerError`](crate::customer::CustomerError), not as `Error`s. This
/// type surfaces infrastructure failures: configuration, database
/// connectivity, schema migration, binding to a port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("config: {0}")]
    Config(String),
}
