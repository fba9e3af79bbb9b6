//! Handlers for item image CRUD.
//!
//! Images are a nested resource: list/create verify the owning item first
//! so a missing item reports "Item not found" rather than an empty result.
//! Get/update/delete operate on the (item_id, image_id) pair directly,
//! reporting "Image not found" when the pair does not exist.

use axum::extract::{Path, Query, State};
use axum::Json;

use catalog_core::error::CoreError;
use catalog_core::item::validate_image_url;
use catalog_core::pagination::{validate_limit, validate_offset};
use catalog_core::types::DbId;
use catalog_db::models::item_image::{
    CreateItemImage, ImageListParams, ItemImage, UpdateItemImage,
};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::MessageResponse;

/// Verify that an item exists, returning NotFound if it does not.
async fn ensure_item_exists(state: &AppState, item_id: DbId) -> AppResult<()> {
    if !state.store.item_exists(item_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        }));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /items/{item_id}/images
// ---------------------------------------------------------------------------

/// List an item's images, optionally filtered by the primary flag.
pub async fn list_images(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Query(params): Query<ImageListParams>,
) -> AppResult<Json<Vec<ItemImage>>> {
    ensure_item_exists(&state, item_id).await?;

    let limit = validate_limit(params.limit).map_err(AppError::Core)?;
    let offset = validate_offset(params.offset).map_err(AppError::Core)?;

    let images = state
        .store
        .list_images(item_id, params.is_primary, Some(limit), offset)
        .await?;
    Ok(Json(images))
}

// ---------------------------------------------------------------------------
// GET /items/{item_id}/images/{image_id}
// ---------------------------------------------------------------------------

/// Get a single image by the (item, image) pair.
pub async fn get_image(
    State(state): State<AppState>,
    Path((item_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ItemImage>> {
    let image = state
        .store
        .find_image(item_id, image_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        })?;
    Ok(Json(image))
}

// ---------------------------------------------------------------------------
// POST /items/{item_id}/images
// ---------------------------------------------------------------------------

/// Attach a new image to an item. A primary image demotes any existing
/// primary image of the same item.
pub async fn create_image(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Json(input): Json<CreateItemImage>,
) -> AppResult<Json<ItemImage>> {
    ensure_item_exists(&state, item_id).await?;
    validate_image_url(&input.image_url)?;

    let image = state.store.create_image(item_id, &input).await?;

    tracing::info!(
        item_id,
        image_id = image.id,
        is_primary = image.is_primary,
        "Image attached to item",
    );

    Ok(Json(image))
}

// ---------------------------------------------------------------------------
// PUT /items/{item_id}/images/{image_id}
// ---------------------------------------------------------------------------

/// Apply a partial update to an image. Setting `is_primary` demotes the
/// item's other images.
pub async fn update_image(
    State(state): State<AppState>,
    Path((item_id, image_id)): Path<(DbId, DbId)>,
    Json(patch): Json<UpdateItemImage>,
) -> AppResult<Json<ItemImage>> {
    if let Some(ref url) = patch.image_url {
        validate_image_url(url)?;
    }

    let image = state
        .store
        .update_image(item_id, image_id, &patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        })?;
    Ok(Json(image))
}

// ---------------------------------------------------------------------------
// DELETE /items/{item_id}/images/{image_id}
// ---------------------------------------------------------------------------

/// Delete a single image.
pub async fn delete_image(
    State(state): State<AppState>,
    Path((item_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    if !state.store.delete_image(item_id, image_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }));
    }

    tracing::info!(item_id, image_id, "Image deleted");

    Ok(Json(MessageResponse {
        message: "Image deleted successfully".to_string(),
    }))
}
