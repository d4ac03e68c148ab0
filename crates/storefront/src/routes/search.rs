//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use loopcart_core::{FieldError, Product};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Location, Result};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Required; kept optional here so absence becomes a field-level 422.
    pub query: Option<String>,
}

/// Keyword search over the catalog.
///
/// GET /search?query=...
///
/// Returns every product whose title, brand or category contains the query,
/// case-insensitively, in catalog order. An unreadable catalog yields `[]`.
#[instrument(skip(state, params))]
pub async fn search(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(params) = params?;
    let Some(query) = params.query else {
        return Err(AppError::validation(
            Location::Query,
            FieldError::missing("query").into(),
        ));
    };

    let results = state.catalog().search(&query).await;
    tracing::info!(query = %query, results = results.len(), "Catalog search");

    Ok(Json(results))
}
