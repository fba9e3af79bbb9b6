//! Item entity model and DTOs.

use catalog_core::item::ItemStatus;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::double_option;

/// A row from the `items` table (or its in-memory equivalent).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub status: ItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new item.
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub status: ItemStatus,
}

/// Patch for partial item updates.
///
/// Absent fields leave the stored value unchanged. `description` is
/// nullable, so it uses a double `Option`: the outer level is "was the
/// field present", the inner level is the new value (possibly null).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
}

/// Filter criteria for listing items. All provided criteria must match.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Case-insensitive category equality.
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// Query parameters for `GET /items`.
///
/// `status` stays a raw string here so the handler can reject unknown
/// values with a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ItemListParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
