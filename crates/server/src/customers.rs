use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use service::customer::{Customer, Edit, Registration};

use crate::errors::ApiError;
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.service.get_all().await?;
    info!(count = customers.len(), "list customers");
    Ok(Json(customers))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.service.get(id).await?))
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<Registration>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.service.register(input).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(edit): Json<Edit>,
) -> Result<StatusCode, ApiError> {
    state.service.update(id, edit).await?;
    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await?;
    Ok(StatusCode::OK)
}
