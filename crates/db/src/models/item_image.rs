//! Item image entity model and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A row from the `item_images` table (or its in-memory equivalent).
///
/// Per item, at most one image has `is_primary = true`; the store
/// backends enforce this on every create/update.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ItemImage {
    pub id: DbId,
    pub item_id: DbId,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for attaching a new image to an item.
#[derive(Debug, Deserialize)]
pub struct CreateItemImage {
    pub image_url: String,
    pub alt_text: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Patch for partial image updates. Same field-presence semantics as
/// [`UpdateItem`](crate::models::item::UpdateItem).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemImage {
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub alt_text: Option<Option<String>>,
    pub is_primary: Option<bool>,
}

/// Query parameters for `GET /items/{item_id}/images`.
#[derive(Debug, Deserialize)]
pub struct ImageListParams {
    pub is_primary: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
