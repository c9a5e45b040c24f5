//! Shared application state for the Axum server.

use std::sync::Arc;

use rumbo_store::Store;

use crate::hub::Hub;

/// State injected into every handler via Axum's `State` extractor.
///
/// Both fields are shared handles; the store is owned by the composition
/// root and the hub holds its own reference to it.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory domain state store.
    pub store: Arc<Store>,
    /// The broadcast hub for push-channel subscribers.
    pub hub: Arc<Hub>,
}

impl AppState {
    /// Bundle a store and hub into the shared state.
    pub const fn new(store: Arc<Store>, hub: Arc<Hub>) -> Self {
        Self { store, hub }
    }
}
