//! Catalog reader and click counter.
//!
//! Handlers translate HTTP into calls on these functions; all catalog
//! semantics (id resolution, pagination, the best-effort counter) live here
//! so every entry point (JSON API, download redirect) behaves the same.

use gallery_core::click::ClickOutcome;
use gallery_core::error::CoreError;
use gallery_core::pagination::{Page, PageRequest};
use gallery_core::types::{parse_item_id, ItemId};
use gallery_db::models::item::Item;
use gallery_db::store::ItemStore;

use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Catalog reader
// ---------------------------------------------------------------------------

/// One page of items, newest first.
///
/// An empty catalog (or an offset past the end) is an empty page, not an error.
pub async fn list_items(store: &dyn ItemStore, page: PageRequest) -> AppResult<Page<Item>> {
    let (items, total) = store.list_items(page).await?;
    Ok(Page::new(items, total, page))
}

/// Resolve a client-supplied id to an item.
pub async fn get_item(store: &dyn ItemStore, raw_id: &str) -> AppResult<Item> {
    let id = resolve_id(raw_id)?;
    let item = store
        .find_item(id)
        .await?
        .ok_or_else(|| CoreError::item_not_found(raw_id))?;
    Ok(item)
}

/// Malformed ids cannot name any item, so they are reported as not found.
fn resolve_id(raw_id: &str) -> Result<ItemId, CoreError> {
    parse_item_id(raw_id).ok_or_else(|| CoreError::item_not_found(raw_id))
}

// ---------------------------------------------------------------------------
// Click counter
// ---------------------------------------------------------------------------

/// Add one click to an item.
///
/// The increment is a single atomic store call. If that call fails, the
/// counter re-reads the item and reports `current + 1` as a best-effort
/// value instead of failing. Only an unknown id, or a failure of that
/// fallback read, surfaces as an error.
pub async fn increment_click(store: &dyn ItemStore, raw_id: &str) -> AppResult<ClickOutcome> {
    let id = resolve_id(raw_id)?;

    match store.increment_click(id).await {
        Ok(Some(click_count)) => Ok(ClickOutcome::Recorded { click_count }),
        Ok(None) => Err(CoreError::item_not_found(raw_id).into()),
        Err(err) => {
            tracing::warn!(
                item_id = %id,
                error = %err,
                rejected = err.is_rejection(),
                "Click increment not persisted, reporting best-effort count",
            );
            let item = store
                .find_item(id)
                .await?
                .ok_or_else(|| CoreError::item_not_found(raw_id))?;
            Ok(ClickOutcome::best_effort_from(item.click_count))
        }
    }
}
