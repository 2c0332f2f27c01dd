//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. The whole table is built once at startup; a malformed or
//! conflicting route aborts the process before it ever binds a socket.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Owns the shared state handed to every handler. Each [`Router::on`] call
/// returns `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

/// Result of matching a method + path against the table.
pub(crate) enum Route<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with a route already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
        self
    }

    /// `HEAD` with no route of its own is served by the `GET` route.
    pub(crate) fn lookup(&self, method: &str, path: &str) -> Route<S> {
        let find = |method: Method| self.routes.get(&method).and_then(|tree| tree.at(path).ok());
        let matched = match method.parse::<Method>() {
            Ok(Method::Head) => find(Method::Head).or_else(|| find(Method::Get)),
            Ok(method) => find(method),
            Err(()) => None,
        };

        if let Some(matched) = matched {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Route::Found(Arc::clone(matched.value), params);
        }

        if self.routes.values().any(|tree| tree.at(path).is_ok()) {
            Route::MethodNotAllowed
        } else {
            Route::NotFound
        }
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method(), req.path()) {
            Route::Found(handler, params) => {
                let head = req.method() == Method::Head.as_str();
                req.set_params(params);
                let mut response = handler.call(self.state.clone(), req).await;
                if head {
                    response.body.clear();
                }
                response
            }
            Route::MethodNotAllowed => Response::error(
                Status::MethodNotAllowed,
                format!("{} is not allowed on {}", req.method(), req.path()),
            ),
            Route::NotFound => Response::error(
                Status::NotFound,
                format!("{} was not found on this server", req.path()),
            ),
        }
    }
}
