//! Implements a struct that holds the state shared by the route handlers.

use std::sync::Arc;

use crate::{api::BackendApi, provider::DataProvider};

/// The state shared by every route handler.
///
/// Generic over the data source so tests can run the full page stack
/// against an in-memory backend.
pub struct AppState<A> {
    /// The provider holding the fetched accounts and transactions.
    pub provider: Arc<DataProvider<A>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Used to decide which month the spending chart covers.
    pub local_timezone: String,
}

impl<A: BackendApi> AppState<A> {
    /// Create an [AppState] around a fresh provider for `api`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    pub fn new(api: A, local_timezone: &str) -> Self {
        Self {
            provider: Arc::new(DataProvider::new(api)),
            local_timezone: local_timezone.to_owned(),
        }
    }
}

// Derived Clone would demand A: Clone even though the provider sits behind
// an Arc.
impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            local_timezone: self.local_timezone.clone(),
        }
    }
}
