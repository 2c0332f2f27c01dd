//! Shared application state.

use crate::customer::CustomerStore;

/// Handed to every handler by the router; cloned once per request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: CustomerStore,
}

impl AppState {
    pub fn new(store: CustomerStore) -> Self {
        Self { store }
    }
}
