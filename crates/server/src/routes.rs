use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::customer::CustomerService;

use crate::customers;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CustomerService>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router.
pub fn build_router(service: Arc<CustomerService>, cors: CorsLayer) -> Router {
    let state = AppState { service };

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/customers",
            get(customers::list).post(customers::register),
        )
        .route(
            "/api/v1/customers/:id",
            get(customers::get_one)
                .put(customers::update)
                .delete(customers::remove),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(cors)
        .with_state(state)
}
