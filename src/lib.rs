//! # customers
//!
//! A REST service for customer accounts: create, read, update, delete,
//! filtered listing, and suspend/activate, backed by a single SQLite table.
//!
//! ## The contract
//!
//! The service runs behind a reverse proxy that owns TLS, rate limiting,
//! slow-client protection and body-size limits. What is left here:
//!
//! - Radix-tree routing via [`matchit`], one tree per method, built once at
//!   startup in [`routes::router`]
//! - Async I/O on hyper, HTTP/1.1 and HTTP/2
//! - One store call per request, each write in its own transaction
//! - Graceful shutdown: SIGTERM / Ctrl-C drains in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use customers::{AppState, Config, CustomerStore, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), customers::Error> {
//!     let config = Config::from_env()?;
//!     let store = CustomerStore::connect(&config.database_url, config.database_max_connections).await?;
//!     store.migrate().await?;
//!
//!     Server::bind(&config.server_address())?
//!         .serve(routes::router(AppState::new(store)))
//!         .await
//! }
//! ```

mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod customer;
pub mod health;
pub mod routes;
pub mod state;

pub use config::Config;
pub use customer::{Customer, CustomerData, CustomerError, CustomerFilter, CustomerQuery, CustomerStore};
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use state::AppState;
pub use status::Status;
