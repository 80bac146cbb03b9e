//! Catalog item rules: field limits, upload validation, cover naming.

use crate::error::CoreError;
use crate::types::ItemId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

/// Maximum download link length in characters.
pub const MAX_LINK_LEN: usize = 2_048;

/// Cover image extensions accepted by the upload endpoint.
pub const SUPPORTED_COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Object-store prefix under which covers are written.
pub const COVER_PREFIX: &str = "covers";

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Validate and normalize a title. Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate the external download link. Only `http://` and `https://` are allowed.
pub fn validate_pan_link(link: &str) -> Result<String, CoreError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("pan_link must not be empty".into()));
    }
    if trimmed.len() > MAX_LINK_LEN {
        return Err(CoreError::Validation(format!(
            "pan_link must be at most {MAX_LINK_LEN} characters"
        )));
    }

    let lower = trimmed.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(trimmed.to_string()),
        _ => Err(CoreError::Validation(
            "pan_link must be an http(s) URL".into(),
        )),
    }
}

/// Normalize an optional description: blank becomes `None`.
pub fn normalize_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(text) = description.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "description must be at most {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(text.to_string()))
}

// ---------------------------------------------------------------------------
// Cover files
// ---------------------------------------------------------------------------

/// Extract and check the cover extension from an uploaded file name.
///
/// Returns the lowercase extension.
pub fn cover_extension(filename: &str) -> Result<String, CoreError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if SUPPORTED_COVER_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported cover format '{filename}'. Supported: {}",
            SUPPORTED_COVER_EXTENSIONS.join(", ")
        )))
    }
}

/// Validate the cover payload size.
pub fn validate_cover_size(len: usize, max_bytes: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("cover file is empty".into()));
    }
    if len > max_bytes {
        return Err(CoreError::Validation(format!(
            "cover file exceeds the {max_bytes} byte limit"
        )));
    }
    Ok(())
}

/// Content type for a validated cover extension.
pub fn cover_content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Object-store key for an item's cover.
pub fn cover_object_path(id: ItemId, ext: &str) -> String {
    format!("{COVER_PREFIX}/{id}.{ext}")
}
