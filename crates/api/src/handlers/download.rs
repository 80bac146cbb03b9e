//! Download redirect.

use axum::extract::{Path, State};
use axum::response::Redirect;
use gallery_core::error::CoreError;

use crate::catalog;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /download/{id}
///
/// Count a click and send the browser to the item's download link. Counter
/// failures are logged and do not stop the redirect; only an unknown item does.
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let store = state.items.as_ref();
    let item = catalog::get_item(store, &id).await?;

    match catalog::increment_click(store, &id).await {
        Ok(outcome) => {
            tracing::info!(
                item_id = %item.id,
                click_count = outcome.click_count(),
                recorded = outcome.is_recorded(),
                "Download redirect",
            );
        }
        Err(err @ AppError::Core(CoreError::NotFound { .. })) => return Err(err),
        Err(err) => {
            tracing::warn!(
                item_id = %item.id,
                error = %err,
                "Click counter failed, redirecting anyway",
            );
        }
    }

    Ok(Redirect::temporary(&item.pan_link))
}
