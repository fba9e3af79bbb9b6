//! Handlers for catalog item CRUD.

use axum::extract::{Path, Query, State};
use axum::Json;

use catalog_core::error::CoreError;
use catalog_core::item::ItemStatus;
use catalog_core::pagination::{validate_limit, validate_offset};
use catalog_core::types::DbId;
use catalog_db::models::item::{CreateItem, Item, ItemFilter, ItemListParams, UpdateItem};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

use super::MessageResponse;

// ---------------------------------------------------------------------------
// GET /items
// ---------------------------------------------------------------------------

/// List items with optional category/status/price filters and pagination.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemListParams>,
) -> AppResult<Json<Vec<Item>>> {
    // Reject unknown status values before touching storage.
    let status: Option<ItemStatus> = params
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(AppError::Core)?;

    let filter = ItemFilter {
        category: params.category.clone(),
        status,
        min_price: params.min_price,
        max_price: params.max_price,
    };

    let limit = validate_limit(params.limit).map_err(AppError::Core)?;
    let offset = validate_offset(params.offset).map_err(AppError::Core)?;

    let items = state.store.list_items(&filter, Some(limit), offset).await?;
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// GET /items/{item_id}
// ---------------------------------------------------------------------------

/// Get a single item by id.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<Item>> {
    let item = state
        .store
        .find_item(item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;
    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// POST /items
// ---------------------------------------------------------------------------

/// Create a new catalog item.
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<Json<Item>> {
    let item = state.store.create_item(&input).await?;

    tracing::info!(item_id = item.id, name = %item.name, "Item created");

    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// PUT /items/{item_id}
// ---------------------------------------------------------------------------

/// Apply a partial update to an item. Only fields present in the payload
/// change.
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Json(patch): Json<UpdateItem>,
) -> AppResult<Json<Item>> {
    let item = state
        .store
        .update_item(item_id, &patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;
    Ok(Json(item))
}

// ---------------------------------------------------------------------------
// DELETE /items/{item_id}
// ---------------------------------------------------------------------------

/// Delete an item and all of its images.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let item = state
        .store
        .delete_item(item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Item",
            id: item_id,
        })?;

    tracing::info!(item_id, name = %item.name, "Item deleted with its images");

    Ok(Json(MessageResponse {
        message: format!("Item '{}' and its images deleted successfully", item.name),
    }))
}

// ---------------------------------------------------------------------------
// GET /items/category/{category}
// ---------------------------------------------------------------------------

/// List all items in a category (case-insensitive match, unpaginated).
pub async fn list_items_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Item>>> {
    let filter = ItemFilter {
        category: Some(category),
        ..Default::default()
    };
    let items = state.store.list_items(&filter, None, 0).await?;
    Ok(Json(items))
}

// ---------------------------------------------------------------------------
// GET /items/status/{status}
// ---------------------------------------------------------------------------

/// List all items with the given status (unpaginated). An unknown status
/// is a validation error.
pub async fn list_items_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Item>>> {
    let status: ItemStatus = status.parse().map_err(AppError::Core)?;

    let filter = ItemFilter {
        status: Some(status),
        ..Default::default()
    };
    let items = state.store.list_items(&filter, None, 0).await?;
    Ok(Json(items))
}
