//! Handler for the click counter endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use gallery_core::click::ClickOutcome;
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /increment_click`.
#[derive(Debug, Deserialize)]
pub struct IncrementClickRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Response body for `POST /increment_click`.
///
/// `note` is only present when the count could not be stored.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub success: bool,
    pub click_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl From<ClickOutcome> for ClickResponse {
    fn from(outcome: ClickOutcome) -> Self {
        Self {
            success: true,
            click_count: outcome.click_count(),
            note: outcome.note(),
        }
    }
}

/// POST /api/increment_click
///
/// Count one click for the item named in the body.
pub async fn increment_click(
    State(state): State<AppState>,
    body: Result<Json<IncrementClickRequest>, JsonRejection>,
) -> AppResult<Json<ClickResponse>> {
    let Json(input) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let id = input
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Wallpaper ID is required".into()))?;

    let outcome = catalog::increment_click(state.items.as_ref(), id).await?;
    tracing::debug!(
        item_id = id,
        click_count = outcome.click_count(),
        recorded = outcome.is_recorded(),
        "Click counted",
    );

    Ok(Json(outcome.into()))
}
