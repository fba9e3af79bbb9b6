//! In-memory store, used when no `DATABASE_URL` is configured and for
//! hermetic tests.
//!
//! All tables live behind one async mutex, so every operation (including
//! cascade deletes and primary-image demotion) is atomic from the
//! caller's view. Id counters are monotonic and never reused.

use catalog_core::types::DbId;
use chrono::Utc;
use tokio::sync::Mutex;

use async_trait::async_trait;

use crate::models::item::{CreateItem, Item, ItemFilter, UpdateItem};
use crate::models::item_image::{CreateItemImage, ItemImage, UpdateItemImage};

use super::{CatalogStore, StoreResult};

struct Tables {
    items: Vec<Item>,
    images: Vec<ItemImage>,
    next_item_id: DbId,
    next_image_id: DbId,
}

impl Tables {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            images: Vec::new(),
            next_item_id: 1,
            next_image_id: 1,
        }
    }
}

/// [`CatalogStore`] backed by mutex-guarded vectors.
///
/// Each instance owns its own tables and counters; tests get isolation by
/// constructing a fresh store.
pub struct MemoryCatalogStore {
    inner: Mutex<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Tables::new()),
        }
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply an (offset, limit) window to an already-filtered sequence.
fn paginate<T>(rows: impl Iterator<Item = T>, limit: Option<i64>, offset: i64) -> Vec<T> {
    let rows = rows.skip(offset.max(0) as usize);
    match limit {
        Some(limit) => rows.take(limit.max(0) as usize).collect(),
        None => rows.collect(),
    }
}

fn matches_filter(item: &Item, filter: &ItemFilter) -> bool {
    if let Some(ref category) = filter.category {
        if !item.category.eq_ignore_ascii_case(category) {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if item.status != status {
            return false;
        }
    }
    if let Some(min) = filter.min_price {
        if item.price < min {
            return false;
        }
    }
    if let Some(max) = filter.max_price {
        if item.price > max {
            return false;
        }
    }
    true
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_items(
        &self,
        filter: &ItemFilter,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<Item>> {
        let tables = self.inner.lock().await;
        let matched = tables
            .items
            .iter()
            .filter(|item| matches_filter(item, filter))
            .cloned();
        Ok(paginate(matched, limit, offset))
    }

    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        let tables = self.inner.lock().await;
        Ok(tables.items.iter().find(|item| item.id == id).cloned())
    }

    async fn item_exists(&self, id: DbId) -> StoreResult<bool> {
        let tables = self.inner.lock().await;
        Ok(tables.items.iter().any(|item| item.id == id))
    }

    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item> {
        let mut tables = self.inner.lock().await;
        let now = Utc::now();
        let item = Item {
            id: tables.next_item_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            category: input.category.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        tables.next_item_id += 1;
        tables.items.push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, id: DbId, patch: &UpdateItem) -> StoreResult<Option<Item>> {
        let mut tables = self.inner.lock().await;
        let Some(item) = tables.items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(ref name) = patch.name {
            item.name = name.clone();
        }
        if let Some(ref description) = patch.description {
            item.description = description.clone();
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(ref category) = patch.category {
            item.category = category.clone();
        }
        if let Some(status) = patch.status {
            item.status = status;
        }
        item.updated_at = Utc::now();

        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        let mut tables = self.inner.lock().await;
        let Some(pos) = tables.items.iter().position(|item| item.id == id) else {
            return Ok(None);
        };
        // Cascade: dependent images go in the same critical section.
        tables.images.retain(|image| image.item_id != id);
        Ok(Some(tables.items.remove(pos)))
    }

    async fn list_images(
        &self,
        item_id: DbId,
        is_primary: Option<bool>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<ItemImage>> {
        let tables = self.inner.lock().await;
        let matched = tables
            .images
            .iter()
            .filter(|image| image.item_id == item_id)
            .filter(|image| is_primary.is_none_or(|primary| image.is_primary == primary))
            .cloned();
        Ok(paginate(matched, limit, offset))
    }

    async fn find_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<Option<ItemImage>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .images
            .iter()
            .find(|image| image.id == image_id && image.item_id == item_id)
            .cloned())
    }

    async fn create_image(
        &self,
        item_id: DbId,
        input: &CreateItemImage,
    ) -> StoreResult<ItemImage> {
        let mut tables = self.inner.lock().await;
        let now = Utc::now();
        let image = ItemImage {
            id: tables.next_image_id,
            item_id,
            image_url: input.image_url.clone(),
            alt_text: input.alt_text.clone(),
            is_primary: input.is_primary,
            created_at: now,
            updated_at: now,
        };
        tables.next_image_id += 1;

        if input.is_primary {
            for other in tables.images.iter_mut().filter(|i| i.item_id == item_id) {
                other.is_primary = false;
            }
        }

        tables.images.push(image.clone());
        Ok(image)
    }

    async fn update_image(
        &self,
        item_id: DbId,
        image_id: DbId,
        patch: &UpdateItemImage,
    ) -> StoreResult<Option<ItemImage>> {
        let mut tables = self.inner.lock().await;
        let Some(pos) = tables
            .images
            .iter()
            .position(|image| image.id == image_id && image.item_id == item_id)
        else {
            return Ok(None);
        };

        if patch.is_primary == Some(true) {
            for other in tables
                .images
                .iter_mut()
                .filter(|i| i.item_id == item_id && i.id != image_id)
            {
                other.is_primary = false;
            }
        }

        let image = &mut tables.images[pos];

        if let Some(ref url) = patch.image_url {
            image.image_url = url.clone();
        }
        if let Some(ref alt_text) = patch.alt_text {
            image.alt_text = alt_text.clone();
        }
        if let Some(primary) = patch.is_primary {
            image.is_primary = primary;
        }
        image.updated_at = Utc::now();

        Ok(Some(image.clone()))
    }

    async fn delete_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<bool> {
        let mut tables = self.inner.lock().await;
        let before = tables.images.len();
        tables
            .images
            .retain(|image| !(image.id == image_id && image.item_id == item_id));
        Ok(tables.images.len() < before)
    }
}
