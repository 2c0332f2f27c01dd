//! Listener, connection tasks and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the accept loop stops taking new connections, waits
//! for every open connection task to finish, and only then returns from
//! [`Server::serve`]. Each request's write is committed or rolled back before
//! its response is produced, so draining never leaves a half-applied change.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::middleware;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Parses `addr` (`host:port`); nothing is bound until [`serve`](Server::serve).
    ///
    /// ```rust
    /// use customers::Server;
    /// assert!(Server::bind("0.0.0.0:8080").is_ok());
    /// assert!(Server::bind("not an address").is_err());
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let addr = addr
            .parse()
            .map_err(|e| Error::Config(format!("invalid socket address `{addr}`: {e}")))?;
        Ok(Self { addr })
    }

    /// Binds, then serves `router` until a shutdown signal arrives and every
    /// in-flight connection has drained.
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(self.addr).await?;
        let router = Arc::new(router);
        let mut connections = JoinSet::new();

        info!(addr = %self.addr, "customers service listening");

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Polled first: once the signal fires, queued connections are
                // left unaccepted.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = connections.len(), "shutdown signal received, draining connections");
                    break;
                }

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        connections.spawn(serve_connection(Arc::clone(&router), stream, peer));
                    }
                    Err(e) => error!("accept error: {e}"),
                },

                // Reap finished connections as we go.
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        while connections.join_next().await.is_some() {}

        info!("customers service stopped");
        Ok(())
    }
}

/// Drives one TCP connection, HTTP/1.1 or HTTP/2 as the client negotiates.
async fn serve_connection<S>(router: Arc<Router<S>>, stream: TcpStream, peer: SocketAddr)
where
    S: Clone + Send + Sync + 'static,
{
    let service = service_fn(move |req| dispatch(Arc::clone(&router), req));

    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(stream), service)
        .await
    {
        error!(%peer, "connection error: {e}");
    }
}

/// Collects the body, routes the request, and converts the response.
///
/// Every failure is answered with a status, so hyper never sees an error.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("failed to read request body: {e}");
            return Ok(Response::error(Status::BadRequest, "Unreadable request body").into_inner());
        }
    };

    let response = middleware::trace(&router, Request::from_parts(parts, body)).await;
    Ok(response.into_inner())
}

/// Completes on SIGTERM (Unix) or Ctrl-C, whichever comes first.
///
/// A signal handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
