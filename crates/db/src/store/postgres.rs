use async_trait::async_trait;
use gallery_core::pagination::PageRequest;
use gallery_core::types::ItemId;

use super::{ItemStore, StoreError};
use crate::models::item::{CreateItem, Item};
use crate::repositories::ItemRepo;
use crate::DbPool;

/// Live catalog stored in Postgres.
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: DbPool,
}

impl PgItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn list_items(&self, page: PageRequest) -> Result<(Vec<Item>, i64), StoreError> {
        Ok(ItemRepo::list_page(&self.pool, page).await?)
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        Ok(ItemRepo::find_by_id(&self.pool, id).await?)
    }

    async fn increment_click(&self, id: ItemId) -> Result<Option<i64>, StoreError> {
        Ok(ItemRepo::increment_click(&self.pool, id).await?)
    }

    async fn create_item(&self, input: &CreateItem) -> Result<Item, StoreError> {
        Ok(ItemRepo::create(&self.pool, input).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
