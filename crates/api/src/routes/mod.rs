pub mod admin;
pub mod auth;
pub mod download;
pub mod health;
pub mod items;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                       list items, newest first (public)
/// /items/{id}                  get one item (public)
/// /increment_click             count a click (public, POST)
///
/// /auth/login                  login (public)
/// /auth/me                     current user (requires auth)
///
/// /admin/items                 upload a new item (admin only, multipart POST)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router(config.storage.max_cover_bytes))
}
