//! PostgreSQL-backed store.
//!
//! Referential integrity and cascade deletion are declared in the schema
//! (`item_images.item_id` has `ON DELETE CASCADE`). Primary-image
//! exclusivity runs inside a transaction that first locks the owning
//! item row, so concurrent "set primary" writes for the same item are
//! serialized; a partial unique index on `(item_id) WHERE is_primary`
//! backstops the invariant at the schema level.

use async_trait::async_trait;
use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, ItemFilter, UpdateItem};
use crate::models::item_image::{CreateItemImage, ItemImage, UpdateItemImage};

use super::{CatalogStore, StoreResult};

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "id, name, description, price, category, status, created_at, updated_at";

/// Column list for `item_images` queries.
const IMAGE_COLUMNS: &str =
    "id, item_id, image_url, alt_text, is_primary, created_at, updated_at";

/// [`CatalogStore`] backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_items(
        &self,
        filter: &ItemFilter,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<Item>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.category.is_some() {
            conditions.push(format!("LOWER(category) = LOWER(${param_idx})"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.min_price.is_some() {
            conditions.push(format!("price >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.max_price.is_some() {
            conditions.push(format!("price <= ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let page_clause = if limit.is_some() {
            format!("LIMIT ${param_idx} OFFSET ${}", param_idx + 1)
        } else {
            format!("OFFSET ${param_idx}")
        };

        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM items {where_clause} ORDER BY id ASC {page_clause}"
        );

        let mut q = sqlx::query_as::<_, Item>(&query);

        if let Some(ref category) = filter.category {
            q = q.bind(category);
        }
        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(min) = filter.min_price {
            q = q.bind(min);
        }
        if let Some(max) = filter.max_price {
            q = q.bind(max);
        }
        if let Some(limit) = limit {
            q = q.bind(limit);
        }
        q = q.bind(offset);

        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn find_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        Ok(sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn item_exists(&self, id: DbId) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM items WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create_item(&self, input: &CreateItem) -> StoreResult<Item> {
        let query = format!(
            "INSERT INTO items (name, description, price, category, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {ITEM_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(input.status)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn update_item(&self, id: DbId, patch: &UpdateItem) -> StoreResult<Option<Item>> {
        let mut sets: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if patch.name.is_some() {
            sets.push(format!("name = ${param_idx}"));
            param_idx += 1;
        }
        if patch.description.is_some() {
            sets.push(format!("description = ${param_idx}"));
            param_idx += 1;
        }
        if patch.price.is_some() {
            sets.push(format!("price = ${param_idx}"));
            param_idx += 1;
        }
        if patch.category.is_some() {
            sets.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if patch.status.is_some() {
            sets.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        sets.push("updated_at = now()".to_string());

        let query = format!(
            "UPDATE items SET {} WHERE id = ${param_idx} RETURNING {ITEM_COLUMNS}",
            sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Item>(&query);

        if let Some(ref name) = patch.name {
            q = q.bind(name);
        }
        if let Some(ref description) = patch.description {
            q = q.bind(description);
        }
        if let Some(price) = patch.price {
            q = q.bind(price);
        }
        if let Some(ref category) = patch.category {
            q = q.bind(category);
        }
        if let Some(status) = patch.status {
            q = q.bind(status);
        }
        q = q.bind(id);

        Ok(q.fetch_optional(&self.pool).await?)
    }

    async fn delete_item(&self, id: DbId) -> StoreResult<Option<Item>> {
        // Images go with the item via ON DELETE CASCADE.
        let query = format!("DELETE FROM items WHERE id = $1 RETURNING {ITEM_COLUMNS}");
        Ok(sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_images(
        &self,
        item_id: DbId,
        is_primary: Option<bool>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Vec<ItemImage>> {
        let mut conditions = vec!["item_id = $1".to_string()];
        let mut param_idx: usize = 2;

        if is_primary.is_some() {
            conditions.push(format!("is_primary = ${param_idx}"));
            param_idx += 1;
        }

        let page_clause = if limit.is_some() {
            format!("LIMIT ${param_idx} OFFSET ${}", param_idx + 1)
        } else {
            format!("OFFSET ${param_idx}")
        };

        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM item_images WHERE {} ORDER BY id ASC {page_clause}",
            conditions.join(" AND ")
        );

        let mut q = sqlx::query_as::<_, ItemImage>(&query).bind(item_id);

        if let Some(primary) = is_primary {
            q = q.bind(primary);
        }
        if let Some(limit) = limit {
            q = q.bind(limit);
        }
        q = q.bind(offset);

        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn find_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<Option<ItemImage>> {
        let query =
            format!("SELECT {IMAGE_COLUMNS} FROM item_images WHERE id = $1 AND item_id = $2");
        Ok(sqlx::query_as::<_, ItemImage>(&query)
            .bind(image_id)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_image(
        &self,
        item_id: DbId,
        input: &CreateItemImage,
    ) -> StoreResult<ItemImage> {
        let mut tx = self.pool.begin().await?;

        // Under READ COMMITTED, two concurrent promotions could each
        // demote against a snapshot that cannot see the other's write
        // and commit two primaries. Locking the owning item row
        // serializes image writes per item.
        sqlx::query("SELECT id FROM items WHERE id = $1 FOR UPDATE")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        if input.is_primary {
            let demoted =
                sqlx::query("UPDATE item_images SET is_primary = FALSE WHERE item_id = $1 AND is_primary")
                    .bind(item_id)
                    .execute(&mut *tx)
                    .await?;
            if demoted.rows_affected() > 0 {
                tracing::debug!(item_id, demoted = demoted.rows_affected(), "Demoted previous primary image");
            }
        }

        let query = format!(
            "INSERT INTO item_images (item_id, image_url, alt_text, is_primary) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {IMAGE_COLUMNS}"
        );
        let image = sqlx::query_as::<_, ItemImage>(&query)
            .bind(item_id)
            .bind(&input.image_url)
            .bind(&input.alt_text)
            .bind(input.is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    async fn update_image(
        &self,
        item_id: DbId,
        image_id: DbId,
        patch: &UpdateItemImage,
    ) -> StoreResult<Option<ItemImage>> {
        let mut tx = self.pool.begin().await?;

        // Same per-item serialization as create_image.
        sqlx::query("SELECT id FROM items WHERE id = $1 FOR UPDATE")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        if patch.is_primary == Some(true) {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM item_images WHERE id = $1 AND item_id = $2)",
            )
            .bind(image_id)
            .bind(item_id)
            .fetch_one(&mut *tx)
            .await?;

            // Demote siblings before the promotion so the one-primary
            // index never sees two flagged rows; skip when the target
            // is missing so a 404 leaves no writes behind.
            if exists {
                sqlx::query(
                    "UPDATE item_images SET is_primary = FALSE \
                     WHERE item_id = $1 AND id <> $2 AND is_primary",
                )
                .bind(item_id)
                .bind(image_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        let mut sets: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if patch.image_url.is_some() {
            sets.push(format!("image_url = ${param_idx}"));
            param_idx += 1;
        }
        if patch.alt_text.is_some() {
            sets.push(format!("alt_text = ${param_idx}"));
            param_idx += 1;
        }
        if patch.is_primary.is_some() {
            sets.push(format!("is_primary = ${param_idx}"));
            param_idx += 1;
        }
        sets.push("updated_at = now()".to_string());

        let query = format!(
            "UPDATE item_images SET {} WHERE id = ${param_idx} AND item_id = ${} \
             RETURNING {IMAGE_COLUMNS}",
            sets.join(", "),
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, ItemImage>(&query);

        if let Some(ref url) = patch.image_url {
            q = q.bind(url);
        }
        if let Some(ref alt_text) = patch.alt_text {
            q = q.bind(alt_text);
        }
        if let Some(primary) = patch.is_primary {
            q = q.bind(primary);
        }
        q = q.bind(image_id).bind(item_id);

        let updated = q.fetch_optional(&mut *tx).await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_image(&self, item_id: DbId, image_id: DbId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM item_images WHERE id = $1 AND item_id = $2")
            .bind(image_id)
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
