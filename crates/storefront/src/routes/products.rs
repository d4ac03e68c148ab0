//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use loopcart_core::Product;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Full catalog in file order.
///
/// GET /products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().await)
}

/// Single product by id.
///
/// GET /products/{id}
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    state
        .catalog()
        .find(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
