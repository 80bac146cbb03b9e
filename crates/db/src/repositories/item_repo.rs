//! Repository for the `wallpapers` table.

use gallery_core::pagination::PageRequest;
use gallery_core::types::ItemId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, cover_url, pan_link, click_count, \
                        created_at, updated_at, created_by";

/// Provides catalog reads, inserts, and the click counter.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO wallpapers (id, title, description, cover_url, pan_link, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(input.id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.cover_url)
            .bind(&input.pan_link)
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an item by id.
    pub async fn find_by_id(pool: &PgPool, id: ItemId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wallpapers WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch one page of items, newest first, together with the total count.
    ///
    /// Both statements run in a single read-only REPEATABLE READ transaction
    /// so the page and the total come from the same snapshot.
    pub async fn list_page(
        pool: &PgPool,
        page: PageRequest,
    ) -> Result<(Vec<Item>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wallpapers")
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM wallpapers \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, Item>(&query)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((items, total))
    }

    /// Atomically add one to `click_count`.
    ///
    /// Returns the new count, or `None` if no item has the given id (in which
    /// case nothing was written).
    pub async fn increment_click(pool: &PgPool, id: ItemId) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE wallpapers SET click_count = click_count + 1 \
             WHERE id = $1 \
             RETURNING click_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(count,)| count))
    }
}
