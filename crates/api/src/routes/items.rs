//! Route definitions for the public catalog.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{clicks, items};
use crate::state::AppState;

/// Routes merged at the `/api` root.
///
/// ```text
/// GET  /items             -> list_items
/// GET  /items/{id}        -> get_item
/// POST /increment_click   -> increment_click
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list_items))
        .route("/items/{id}", get(items::get_item))
        .route("/increment_click", post(clicks::increment_click))
}
