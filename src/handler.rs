//! Route handlers and how the router stores them.
//!
//! Every route handler is an `async fn(S, Request) -> impl IntoResponse`, but
//! each such function is its own type. The router keeps them side by side in
//! its per-method trees, so registration turns each one into a
//! [`BoxedHandler`]: an `Arc` over a trait object whose `call` returns a
//! pinned, boxed future.
//!
//! ```text
//! router.on(Method::Get, "/customers/{id}", get_customer)
//!     get_customer.into_boxed_handler()   -> Arc<FnHandler<_>>
//! per request:
//!     handler.call(state.clone(), req)    -> BoxFuture resolving to Response
//! ```
//!
//! `S` is cloned for every request; [`AppState`](crate::AppState) only wraps
//! a connection pool, so the clone is a reference-count bump.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe form of [`Handler`], used by the router at dispatch time.
///
/// Public only because [`Handler::into_boxed_handler`] names it.
#[doc(hidden)]
pub trait ErasedHandler<S> {
    fn call(&self, state: S, req: Request) -> BoxFuture;
}

#[doc(hidden)]
pub type BoxedHandler<S> = Arc<dyn ErasedHandler<S> + Send + Sync + 'static>;

/// Anything that can be mounted on a [`Router`](crate::Router).
///
/// Implemented automatically for async functions shaped like
///
/// ```text
/// async fn handler(state: S, req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed; there is no need to implement it by hand.
pub trait Handler<S>: sealed::Sealed<S> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler<S>;
}

mod sealed {
    pub trait Sealed<S> {}
}

impl<F, Fut, R, S> sealed::Sealed<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Send + 'static,
{
}

impl<F, Fut, R, S> Handler<S> for F
where
    F: Fn(S, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
    S: Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler<S> {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R, S> ErasedHandler<S> for FnHandler<F>
where
    F: Fn(S, Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, state: S, req: Request) -> BoxFuture {
        let response = (self.0)(state, req);
        Box::pin(async move { response.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Status;

    async fn echo_state(state: u16, _req: Request) -> Response {
        Response::json(&state)
    }

    async fn fails(_state: u16, _req: Request) -> Result<Response, Status> {
        Err(Status::NotFound)
    }

    #[tokio::test]
    async fn boxed_handler_receives_state() {
        let handler = echo_state.into_boxed_handler();
        let response = handler.call(7, Request::new("GET", "/")).await;

        assert_eq!(response.status_code(), Status::Ok);
        assert_eq!(response.body(), b"7");
    }

    #[tokio::test]
    async fn error_results_become_responses() {
        let handler = fails.into_boxed_handler();
        let response = handler.call(0, Request::new("GET", "/")).await;

        assert_eq!(response.status_code(), Status::NotFound);
    }
}
