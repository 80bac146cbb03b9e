use std::sync::Arc;

use gallery_core::object_store::ObjectStore;
use gallery_db::store::ItemStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog data source (live Postgres or fixture).
    pub items: Arc<dyn ItemStore>,
    /// Blob storage for uploaded covers.
    pub objects: Arc<dyn ObjectStore>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
}
