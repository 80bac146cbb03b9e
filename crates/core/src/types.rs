use uuid::Uuid;

/// Catalog items are keyed by UUIDv7 so ids sort roughly by creation time.
pub type ItemId = Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a client-supplied item id.
///
/// Ids are opaque to clients, so a malformed value is not an input error:
/// it simply cannot name any item. Callers treat `None` as "not found".
pub fn parse_item_id(raw: &str) -> Option<ItemId> {
    Uuid::parse_str(raw.trim()).ok()
}

/// Generate a fresh id for a new item.
pub fn new_item_id() -> ItemId {
    Uuid::now_v7()
}
