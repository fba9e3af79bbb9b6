//! Unified storage contract for the catalog service.
//!
//! Both backends implement the same [`CatalogStore`] trait: `deleteItem`
//! always cascades to images, id assignment is monotonic starting at 1,
//! and the single-primary-image invariant is enforced inside the same
//! transactional boundary (a sqlx transaction, or the table lock) as the
//! triggering write.

use async_trait::async_trait;
use catalog_core::types::DbId;

use crate::models::item::{CreateItem, Item, ItemFilter, UpdateItem};
use crate::models::item_image::{CreateItemImage, ItemImage, UpdateItemImage};

mod memory;
mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Storage-level failure. Not retried internally; the API layer surfaces
/// it as a 500-class response.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for store operation results.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage contract shared by the PostgreSQL and in-memory backends.
///
/// Lookups return `Ok(None)` for missing rows; `Err` is reserved for
/// backend failures. Existence of the owning item for image operations is
/// the caller's concern (the HTTP layer checks it to produce the right
/// 404 message).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Backend health probe.
    async fn ping(&self) -> StoreResult<()>;

    /// List items matching all provided filter criteria, in insertion
    /// (ascending id) order. `limit = None` disables pagination.
    async fn list_items(
        &self,
        filter: &ItemFilter,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<Item>>;

    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>>;

    async fn item_exists(&self, id: DbId) -> StoreResult<bool>;

    /// Insert a new item, assigning its id and timestamps
    /// (`created_at == updated_at`).
    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item>;

    /// Apply a partial update. Fields absent from the patch are left
    /// unchanged; `updated_at` is always refreshed.
    async fn update_item(&self, id: DbId, patch: &UpdateItem) -> StoreResult<Option<Item>>;

    /// Delete an item and, atomically, every image that belongs to it.
    /// Returns the deleted item so callers can reference its name.
    async fn delete_item(&self, id: DbId) -> StoreResult<Option<Item>>;

    /// List an item's images, optionally filtered by the primary flag,
    /// in insertion (ascending id) order.
    async fn list_images(
        &self,
        item_id: DbId,
        is_primary: Option<bool>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<ItemImage>>;

    /// Look up an image by the (item_id, image_id) pair.
    async fn find_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<Option<ItemImage>>;

    /// Attach a new image to an item. When the new image is primary,
    /// every other image of the same item is demoted in the same
    /// transaction.
    async fn create_image(&self, item_id: DbId, input: &CreateItemImage)
        -> StoreResult<ItemImage>;

    /// Apply a partial update to an image. Setting `is_primary = true`
    /// demotes all other images of the same item in the same transaction.
    async fn update_image(
        &self,
        item_id: DbId,
        image_id: DbId,
        patch: &UpdateItemImage,
    ) -> StoreResult<Option<ItemImage>>;

    /// Delete a single image. Returns whether the pair existed.
    async fn delete_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<bool>;
}
