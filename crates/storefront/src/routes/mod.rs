//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Service banner with example paths
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog readable)
//!
//! # Catalog
//! GET  /search?query=...       - Keyword search over title, brand, category
//! GET  /products               - Full catalog
//! GET  /products/{id}          - Single product by id
//!
//! # Forms (forwarded by email)
//! POST /request-access         - Exclusive collection access request
//! POST /personal-concierge     - Personal concierge request
//! ```

pub mod contact;
pub mod home;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/search", get(search::search))
        .nest("/products", product_routes())
        .route("/request-access", post(contact::request_access))
        .route("/personal-concierge", post(contact::personal_concierge))
}
