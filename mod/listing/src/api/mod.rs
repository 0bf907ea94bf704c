mod cars;

use std::sync::Arc;

use axum::Router;

use crate::service::ListingService;

/// Build the complete listing module router.
///
/// Routes:
/// - `POST /cars`              — create listing
/// - `GET  /cars`              — list all listings
/// - `GET  /cars/{id}`         — get listing by id
/// - `PUT  /cars/{id}`         — full-replace update
/// - `POST /cars/{id}/@toggle` — toggle availability
pub fn router(service: Arc<ListingService>) -> Router {
    cars::router(service)
}
