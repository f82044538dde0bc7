use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_booking, decide_booking, get_booking, get_item_bookings, list_bookings,
    list_owner_bookings,
};

/// Creates the API router with all booking endpoints
///
/// Every endpoint except `/health` reads the acting user from `X-Sharer-User-Id`.
///
/// - POST /bookings - Request a booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
/// - GET /bookings/:id - Get a booking visible to the user
/// - GET /bookings - List the user's bookings as renter
/// - GET /bookings/owner - List bookings on the user's items
/// - GET /items/:id/bookings - Last and next booking of an owned item
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/:id", get(get_booking).patch(decide_booking))
        .route("/items/:id/bookings", get(get_item_bookings))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
