use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use carlot_core::{ListResult, ServiceError};

use crate::model::{Car, CarPayload};
use crate::service::ListingService;

type ServiceState = Arc<ListingService>;

pub fn router(service: Arc<ListingService>) -> Router {
    Router::new()
        .route("/cars", post(create_car).get(list_cars))
        .route("/cars/{id}", get(get_car).put(update_car))
        .route("/cars/{id}/@toggle", post(toggle_car))
        .with_state(service)
}

// ---------------------------------------------------------------------------
// POST /cars
// ---------------------------------------------------------------------------

async fn create_car(
    State(service): State<ServiceState>,
    Json(payload): Json<CarPayload>,
) -> Result<Json<Car>, ServiceError> {
    let car = service.create(payload)?;
    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// GET /cars
// ---------------------------------------------------------------------------

async fn list_cars(
    State(service): State<ServiceState>,
) -> Result<Json<ListResult<Car>>, ServiceError> {
    let items = service.list()?;
    let total = items.len();
    Ok(Json(ListResult { items, total }))
}

// ---------------------------------------------------------------------------
// GET /cars/:id
// ---------------------------------------------------------------------------

async fn get_car(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, ServiceError> {
    let car = service.get(&id)?;
    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// PUT /cars/:id
// ---------------------------------------------------------------------------

async fn update_car(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
    Json(payload): Json<CarPayload>,
) -> Result<Json<Car>, ServiceError> {
    let car = service.update(&id, payload)?;
    Ok(Json(car))
}

// ---------------------------------------------------------------------------
// POST /cars/:id/@toggle
// ---------------------------------------------------------------------------

async fn toggle_car(
    State(service): State<ServiceState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    service.toggle_availability(&id)?;
    Ok(Json(serde_json::json!({ "toggled": true })))
}
