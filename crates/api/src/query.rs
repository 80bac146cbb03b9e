//! Shared query parameter types for API handlers.

use gallery_core::error::CoreError;
use gallery_core::pagination::PageRequest;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are range-checked when converted into a [`PageRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TryFrom<PaginationParams> for PageRequest {
    type Error = CoreError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        PageRequest::new(params.limit, params.offset)
    }
}
