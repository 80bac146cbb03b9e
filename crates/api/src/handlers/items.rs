//! Handlers for the public catalog (`/items`).

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use gallery_core::pagination::{Page, PageRequest};
use gallery_db::models::item::Item;

use crate::catalog;
use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::state::AppState;

/// GET /api/items?limit=&offset=
///
/// One page of items, newest first, as `{ items, total, hasMore }`. A `limit`
/// outside `1..=100` or a negative `offset` is a 400.
pub async fn list_items(
    State(state): State<AppState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
) -> AppResult<Json<Page<Item>>> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let request = PageRequest::try_from(params)?;

    let page = catalog::list_items(state.items.as_ref(), request).await?;
    Ok(Json(page))
}

/// GET /api/items/{id}
///
/// The full item record. Unknown ids are 404.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    let item = catalog::get_item(state.items.as_ref(), &id).await?;
    Ok(Json(item))
}
