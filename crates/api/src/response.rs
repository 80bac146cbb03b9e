//! Shared response envelope types for API handlers.
//!
//! Admin endpoints answer with a `{ "data": ... }` envelope. The public
//! catalog endpoints keep their own flat shapes, which clients already
//! depend on.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
