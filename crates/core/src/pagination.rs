//! Offset pagination for catalog listings.
//!
//! Listing endpoints take `?limit=&offset=`. Absent values fall back to
//! defaults. Values outside the accepted range are rejected, never adjusted,
//! so a page always holds exactly the window the caller asked for.

use serde::Serialize;

use crate::error::CoreError;

/// Page size used when the caller does not pass `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a single request may ask for.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate a user-provided limit against `[1, max]`, using `default` when absent.
pub fn validate_limit(limit: Option<i64>, default: i64, max: i64) -> Result<i64, CoreError> {
    match limit {
        None => Ok(default),
        Some(limit) if (1..=max).contains(&limit) => Ok(limit),
        Some(limit) => Err(CoreError::Validation(format!(
            "limit must be between 1 and {max}, got {limit}"
        ))),
    }
}

/// Validate a user-provided offset, defaulting to zero.
pub fn validate_offset(offset: Option<i64>) -> Result<i64, CoreError> {
    match offset {
        None => Ok(0),
        Some(offset) if offset >= 0 => Ok(offset),
        Some(offset) => Err(CoreError::Validation(format!(
            "offset must not be negative, got {offset}"
        ))),
    }
}

/// A validated `(limit, offset)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        Ok(Self {
            limit: validate_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)?,
            offset: validate_offset(offset)?,
        })
    }

    /// Whether items exist beyond this page, given the collection size.
    pub fn has_more(&self, total: i64) -> bool {
        total > self.offset.saturating_add(self.limit)
    }

    /// Number of items this page holds for a collection of `total` items.
    pub fn expected_len(&self, total: i64) -> i64 {
        self.limit.min(total.saturating_sub(self.offset).max(0))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

/// One page of results together with the collection size.
///
/// Serializes as `{ "items": [...], "total": n, "hasMore": bool }`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            has_more: request.has_more(total),
        }
    }
}
