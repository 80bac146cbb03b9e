//! Integration tests for the `wallpapers` repository and the Postgres store.
//!
//! Exercises ordering, pagination windows, the atomic click counter and
//! schema constraints against a real database.

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use gallery_core::pagination::PageRequest;
use gallery_core::types::new_item_id;
use gallery_db::models::item::CreateItem;
use gallery_db::repositories::ItemRepo;
use gallery_db::store::{ItemStore, PgItemStore};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_item(title: &str) -> CreateItem {
    CreateItem {
        id: new_item_id(),
        title: title.to_string(),
        description: Some("**markdown**".to_string()),
        cover_url: format!("/media/covers/{title}.png"),
        pan_link: "https://pan.baidu.com/s/abc".to_string(),
        created_by: Some("admin".to_string()),
    }
}

/// Insert an item and pin its `created_at` to the given day of January 2024.
async fn seed(pool: &PgPool, title: &str, day: u32) -> Uuid {
    let item = ItemRepo::create(pool, &new_item(title)).await.unwrap();
    let created_at = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
    sqlx::query("UPDATE wallpapers SET created_at = $2, updated_at = $2 WHERE id = $1")
        .bind(item.id)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
    item.id
}

async fn row_count(pool: &PgPool) -> i64 {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wallpapers")
        .fetch_one(pool)
        .await
        .unwrap();
    total
}

async fn set_clicks(pool: &PgPool, id: Uuid, clicks: i64) {
    sqlx::query("UPDATE wallpapers SET click_count = $2 WHERE id = $1")
        .bind(id)
        .bind(clicks)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Create / find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_starts_with_zero_clicks(pool: PgPool) {
    let input = new_item("Dream Forest");
    let item = ItemRepo::create(&pool, &input).await.unwrap();

    assert_eq!(item.id, input.id);
    assert_eq!(item.click_count, 0);
    assert_eq!(item.created_at, item.updated_at);
    assert_eq!(item.created_by.as_deref(), Some("admin"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_returns_none(pool: PgPool) {
    let found = ItemRepo::find_by_id(&pool, Uuid::from_u128(42)).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_title_violates_check(pool: PgPool) {
    let result = ItemRepo::create(&pool, &new_item("   ")).await;
    assert!(result.is_err(), "blank title must be rejected by the schema");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_pages_newest_first(pool: PgPool) {
    let a = seed(&pool, "A", 3).await;
    let b = seed(&pool, "B", 1).await;
    let c = seed(&pool, "C", 2).await;

    let first = PageRequest::new(Some(2), Some(0)).unwrap();
    let (items, total) = ItemRepo::list_page(&pool, first).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![a, c]);

    let second = PageRequest::new(Some(2), Some(2)).unwrap();
    let (items, total) = ItemRepo::list_page(&pool, second).await.unwrap();
    assert_eq!(total, 3);
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_ties_broken_by_id(pool: PgPool) {
    let first = seed(&pool, "first", 5).await;
    let second = seed(&pool, "second", 5).await;

    let (items, _) = ItemRepo::list_page(&pool, PageRequest::default()).await.unwrap();
    let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();

    let mut expected = vec![first, second];
    expected.sort_by(|x, y| y.cmp(x));
    assert_eq!(ids, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_catalog(pool: PgPool) {
    let (items, total) = ItemRepo::list_page(&pool, PageRequest::default()).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(total, 0);
}

// ---------------------------------------------------------------------------
// Click counter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_returns_new_count(pool: PgPool) {
    let id = seed(&pool, "X", 1).await;
    set_clicks(&pool, id, 5).await;

    let count = ItemRepo::increment_click(&pool, id).await.unwrap();
    assert_eq!(count, Some(6));

    let item = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(item.click_count, 6);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_increment_missing_writes_nothing(pool: PgPool) {
    seed(&pool, "only", 1).await;

    let count = ItemRepo::increment_click(&pool, Uuid::from_u128(7)).await.unwrap();
    assert_eq!(count, None);
    assert_eq!(row_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let id = seed(&pool, "busy", 1).await;

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let pool = pool.clone();
            tokio::spawn(async move { ItemRepo::increment_click(&pool, id).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let item = ItemRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(item.click_count, 20);
}

// ---------------------------------------------------------------------------
// PgItemStore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pg_store_delegates_to_repo(pool: PgPool) {
    let store = PgItemStore::new(pool.clone());
    store.ping().await.unwrap();

    let created = store.create_item(&new_item("via store")).await.unwrap();
    assert_matches!(store.increment_click(created.id).await, Ok(Some(1)));
    assert_matches!(store.find_item(created.id).await, Ok(Some(item)) if item.click_count == 1);

    let (items, total) = store.list_items(PageRequest::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, created.id);
}
