//! Admin upload of new catalog items.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use gallery_core::item::{
    cover_content_type, cover_extension, cover_object_path, normalize_description,
    validate_cover_size, validate_pan_link, validate_title,
};
use gallery_core::types::new_item_id;
use gallery_db::models::item::{CreateItem, Item};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Raw multipart fields before validation.
#[derive(Debug, Default)]
struct UploadForm {
    cover: Option<(String, Vec<u8>)>,
    title: Option<String>,
    description: Option<String>,
    pan_link: Option<String>,
}

/// POST /api/admin/items
///
/// Accepts a multipart form with a required `cover` file (`file` is accepted
/// as an alias), required `title` and `pan_link` fields and an optional
/// `description`. The cover is stored first; if the row cannot be created
/// afterwards the stored cover is removed again.
pub async fn create_item(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Item>>)> {
    let form = read_form(multipart).await?;

    let title = validate_title(form.title.as_deref().unwrap_or(""))?;
    let pan_link = validate_pan_link(form.pan_link.as_deref().unwrap_or(""))?;
    let description = normalize_description(form.description.as_deref())?;

    let (filename, bytes) = form
        .cover
        .ok_or_else(|| AppError::BadRequest("Missing required 'cover' field".into()))?;
    let ext = cover_extension(&filename)?;
    validate_cover_size(bytes.len(), state.config.storage.max_cover_bytes)?;

    let id = new_item_id();
    let object_path = cover_object_path(id, &ext);
    state
        .objects
        .upload(&object_path, bytes, cover_content_type(&ext))
        .await?;

    let input = CreateItem {
        id,
        title,
        description,
        cover_url: state.objects.public_url(&object_path),
        pan_link,
        created_by: Some(admin.username),
    };

    match state.items.create_item(&input).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, cover = %object_path, "Wallpaper created");
            Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
        }
        Err(err) => {
            if let Err(cleanup) = state.objects.remove(&object_path).await {
                tracing::error!(
                    cover = %object_path,
                    error = %cleanup,
                    "Failed to remove cover after rejected insert",
                );
            }
            Err(err.into())
        }
    }
}

async fn read_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "cover" | "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.cover = Some((filename, data.to_vec()));
            }
            "title" | "description" | "pan_link" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                match name.as_str() {
                    "title" => form.title = Some(text),
                    "description" => form.description = Some(text),
                    _ => form.pan_link = Some(text),
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(form)
}
