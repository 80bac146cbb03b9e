//! Route definitions for the download redirect.

use axum::routing::get;
use axum::Router;

use crate::handlers::download;
use crate::state::AppState;

/// Mount the download redirect (root-level, NOT under `/api`).
///
/// ```text
/// GET /download/{id}  -> download
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/download/{id}", get(download::download))
}
