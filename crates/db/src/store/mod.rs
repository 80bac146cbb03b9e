//! Pluggable item data source.
//!
//! Handlers never talk to a concrete backend. They go through
//! [`ItemStore`], which has two implementations:
//!
//! - [`PgItemStore`] -- the live Postgres catalog, backed by [`ItemRepo`].
//! - [`FixtureItemStore`] -- an in-memory catalog for demos and tests,
//!   optionally read-only.
//!
//! [`ItemRepo`]: crate::repositories::ItemRepo

mod fixture;
mod postgres;

use async_trait::async_trait;
use gallery_core::pagination::PageRequest;
use gallery_core::types::ItemId;

use crate::models::item::{CreateItem, Item};

pub use fixture::{FixtureError, FixtureItemStore};
pub use postgres::PgItemStore;

/// PostgreSQL `insufficient_privilege`.
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";
/// PostgreSQL `read_only_sql_transaction`.
const PG_READ_ONLY_TRANSACTION: &str = "25006";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend refused the write (permissions, read-only dataset).
    #[error("Write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Whether the store refused the operation, as opposed to failing to run it.
    pub fn is_rejection(&self) -> bool {
        match self {
            StoreError::Rejected(_) => true,
            StoreError::Database(sqlx::Error::Database(db_err)) => matches!(
                db_err.code().as_deref(),
                Some(PG_INSUFFICIENT_PRIVILEGE | PG_READ_ONLY_TRANSACTION)
            ),
            StoreError::Database(_) => false,
        }
    }
}

/// Read and write access to catalog items.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// One page of items ordered `created_at DESC, id DESC`, plus the total count.
    async fn list_items(&self, page: PageRequest) -> Result<(Vec<Item>, i64), StoreError>;

    /// A single item, or `None` if the id is unknown.
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, StoreError>;

    /// Atomically increment the click counter.
    ///
    /// Returns the stored count after the increment, or `None` when the id is
    /// unknown. Unknown ids must not create anything.
    async fn increment_click(&self, id: ItemId) -> Result<Option<i64>, StoreError>;

    /// Insert a new item.
    async fn create_item(&self, input: &CreateItem) -> Result<Item, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
