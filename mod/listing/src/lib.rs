pub mod api;
pub mod model;
pub mod service;
pub mod store;

use std::sync::Arc;

use axum::Router;
use carlot_core::Module;
use carlot_kv::KVStore;

use service::ListingService;

/// The Listing module — car listing management.
///
/// Embed this in a server binary to get create, full-replace update,
/// availability toggling, list, and get-by-id over car records persisted
/// in the KV store.
pub struct ListingModule {
    service: Arc<ListingService>,
}

impl ListingModule {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            service: Arc::new(ListingService::new(kv)),
        }
    }

    /// Get a reference to the ListingService for programmatic access.
    pub fn service(&self) -> &Arc<ListingService> {
        &self.service
    }
}

impl Module for ListingModule {
    fn name(&self) -> &str {
        "listing"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.service))
    }
}
