//! Root route handler.

use axum::Json;
use serde::Serialize;

/// Paths suggested to someone poking at the service root.
pub const TRY_PATHS: &[&str] = &["/search?query=iphone", "/products", "/request-access"];

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub status: &'static str,
    pub message: &'static str,
    #[serde(rename = "try")]
    pub try_paths: &'static [&'static str],
}

/// Report that the backend is up.
pub async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        status: "ok",
        message: "Backend is running",
        try_paths: TRY_PATHS,
    })
}
