//! Route definitions for `/admin`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::admin_items;
use crate::state::AppState;

/// Room for the text fields and multipart framing around the cover.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /items    -> create_item (multipart, admin only)
/// ```
///
/// The body limit is raised so a cover of up to `max_cover_bytes` reaches the
/// handler, which reports oversize files as a validation error.
pub fn router(max_cover_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/items", post(admin_items::create_item))
        .layer(DefaultBodyLimit::max(
            max_cover_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}
