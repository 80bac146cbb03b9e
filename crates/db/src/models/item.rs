//! Catalog item model and DTOs.

use gallery_core::types::{ItemId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `wallpapers` table.
///
/// Also the shape fixture files are written in, hence `Deserialize`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: String,
    pub pan_link: String,
    #[serde(default)]
    pub click_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub created_by: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Insert payload for a new item.
///
/// The id is chosen by the caller because the cover object is stored under
/// it before the row exists. Fields are expected to be validated already.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub id: ItemId,
    pub title: String,
    pub description: Option<String>,
    pub cover_url: String,
    pub pan_link: String,
    pub created_by: Option<String>,
}
