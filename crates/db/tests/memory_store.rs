//! Store-contract tests against the in-memory backend.
//!
//! Each test builds a fresh store, so there is no shared state between
//! tests. The behaviors exercised here are the ones the `CatalogStore`
//! contract promises for both backends.

use catalog_core::item::ItemStatus;
use catalog_db::models::item::{CreateItem, ItemFilter, UpdateItem};
use catalog_db::models::item_image::{CreateItemImage, UpdateItemImage};
use catalog_db::store::{CatalogStore, MemoryCatalogStore};

fn item(name: &str, price: f64, category: &str) -> CreateItem {
    CreateItem {
        name: name.to_string(),
        description: None,
        price,
        category: category.to_string(),
        status: ItemStatus::default(),
    }
}

fn image(url: &str, is_primary: bool) -> CreateItemImage {
    CreateItemImage {
        image_url: url.to_string(),
        alt_text: None,
        is_primary,
    }
}

#[tokio::test]
async fn ids_start_at_one_and_increase() {
    let store = MemoryCatalogStore::new();
    let a = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let b = store.create_item(&item("B", 2.0, "Tools")).await.unwrap();
    assert_eq!(a.id, 1);
    assert_eq!(b.id, 2);
    assert_eq!(a.created_at, a.updated_at);
}

#[tokio::test]
async fn deleted_ids_are_never_reused() {
    let store = MemoryCatalogStore::new();
    let a = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    store.delete_item(a.id).await.unwrap();
    let b = store.create_item(&item("B", 2.0, "Tools")).await.unwrap();
    assert_eq!(b.id, 2);
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_unchanged() {
    let store = MemoryCatalogStore::new();
    let created = store
        .create_item(&CreateItem {
            name: "Hammer".to_string(),
            description: Some("16oz".to_string()),
            price: 9.99,
            category: "Tools".to_string(),
            status: ItemStatus::Available,
        })
        .await
        .unwrap();

    let patch = UpdateItem {
        price: Some(12.5),
        ..Default::default()
    };
    let updated = store.update_item(created.id, &patch).await.unwrap().unwrap();

    assert_eq!(updated.name, "Hammer");
    assert_eq!(updated.description.as_deref(), Some("16oz"));
    assert_eq!(updated.price, 12.5);
    assert_eq!(updated.category, "Tools");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
}

#[tokio::test]
async fn explicit_null_clears_description() {
    let store = MemoryCatalogStore::new();
    let created = store
        .create_item(&CreateItem {
            name: "Hammer".to_string(),
            description: Some("16oz".to_string()),
            price: 9.99,
            category: "Tools".to_string(),
            status: ItemStatus::Available,
        })
        .await
        .unwrap();

    let patch = UpdateItem {
        description: Some(None),
        ..Default::default()
    };
    let updated = store.update_item(created.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.description, None);
}

#[tokio::test]
async fn update_missing_item_returns_none() {
    let store = MemoryCatalogStore::new();
    let result = store.update_item(999, &UpdateItem::default()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn category_filter_is_case_insensitive() {
    let store = MemoryCatalogStore::new();
    store.create_item(&item("A", 1.0, "tools")).await.unwrap();
    store.create_item(&item("B", 2.0, "Garden")).await.unwrap();

    let filter = ItemFilter {
        category: Some("TOOLS".to_string()),
        ..Default::default()
    };
    let matched = store.list_items(&filter, None, 0).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "A");
}

#[tokio::test]
async fn price_range_and_status_filters_combine() {
    let store = MemoryCatalogStore::new();
    store.create_item(&item("Cheap", 1.0, "Tools")).await.unwrap();
    store.create_item(&item("Mid", 10.0, "Tools")).await.unwrap();
    let sold = store.create_item(&item("Pricey", 100.0, "Tools")).await.unwrap();
    store
        .update_item(
            sold.id,
            &UpdateItem {
                status: Some(ItemStatus::Sold),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let filter = ItemFilter {
        min_price: Some(5.0),
        max_price: Some(50.0),
        status: Some(ItemStatus::Available),
        ..Default::default()
    };
    let matched = store.list_items(&filter, None, 0).await.unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "Mid");
}

#[tokio::test]
async fn pagination_windows_the_filtered_sequence() {
    let store = MemoryCatalogStore::new();
    for name in ["First", "Second", "Third"] {
        store.create_item(&item(name, 1.0, "Tools")).await.unwrap();
    }

    let page = store
        .list_items(&ItemFilter::default(), Some(1), 1)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Second");

    let past_end = store
        .list_items(&ItemFilter::default(), Some(10), 5)
        .await
        .unwrap();
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn delete_item_cascades_to_images() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let other = store.create_item(&item("B", 2.0, "Tools")).await.unwrap();

    let img_a = store
        .create_image(owner.id, &image("http://x/a.png", false))
        .await
        .unwrap();
    let img_b = store
        .create_image(other.id, &image("http://x/b.png", false))
        .await
        .unwrap();

    let deleted = store.delete_item(owner.id).await.unwrap().unwrap();
    assert_eq!(deleted.name, "A");

    assert!(store.find_image(owner.id, img_a.id).await.unwrap().is_none());
    // The unrelated item's image survives.
    assert!(store.find_image(other.id, img_b.id).await.unwrap().is_some());
}

#[tokio::test]
async fn creating_a_primary_image_demotes_the_previous_one() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();

    let first = store
        .create_image(owner.id, &image("http://x/a.png", true))
        .await
        .unwrap();
    assert!(first.is_primary);

    let second = store
        .create_image(owner.id, &image("http://x/b.png", true))
        .await
        .unwrap();
    assert!(second.is_primary);

    let first = store.find_image(owner.id, first.id).await.unwrap().unwrap();
    assert!(!first.is_primary);

    let primaries = store
        .list_images(owner.id, Some(true), None, 0)
        .await
        .unwrap();
    assert_eq!(primaries.len(), 1);
    assert_eq!(primaries[0].id, second.id);
}

#[tokio::test]
async fn promoting_an_image_via_update_demotes_siblings_only() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let other = store.create_item(&item("B", 2.0, "Tools")).await.unwrap();

    let a = store
        .create_image(owner.id, &image("http://x/a.png", true))
        .await
        .unwrap();
    let b = store
        .create_image(owner.id, &image("http://x/b.png", false))
        .await
        .unwrap();
    let unrelated = store
        .create_image(other.id, &image("http://x/c.png", true))
        .await
        .unwrap();

    let patch = UpdateItemImage {
        is_primary: Some(true),
        ..Default::default()
    };
    store.update_image(owner.id, b.id, &patch).await.unwrap().unwrap();

    let a = store.find_image(owner.id, a.id).await.unwrap().unwrap();
    let b = store.find_image(owner.id, b.id).await.unwrap().unwrap();
    let unrelated = store
        .find_image(other.id, unrelated.id)
        .await
        .unwrap()
        .unwrap();

    assert!(!a.is_primary);
    assert!(b.is_primary);
    // The other item's primary image is untouched.
    assert!(unrelated.is_primary);
}

#[tokio::test]
async fn setting_is_primary_false_does_not_demote_siblings() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let a = store
        .create_image(owner.id, &image("http://x/a.png", true))
        .await
        .unwrap();
    let b = store
        .create_image(owner.id, &image("http://x/b.png", false))
        .await
        .unwrap();

    let patch = UpdateItemImage {
        is_primary: Some(false),
        ..Default::default()
    };
    store.update_image(owner.id, b.id, &patch).await.unwrap().unwrap();

    let a = store.find_image(owner.id, a.id).await.unwrap().unwrap();
    assert!(a.is_primary);
}

#[tokio::test]
async fn image_lookup_requires_matching_owner() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let other = store.create_item(&item("B", 2.0, "Tools")).await.unwrap();
    let img = store
        .create_image(owner.id, &image("http://x/a.png", false))
        .await
        .unwrap();

    assert!(store.find_image(other.id, img.id).await.unwrap().is_none());
    assert!(!store.delete_image(other.id, img.id).await.unwrap());
    assert!(store
        .update_image(other.id, img.id, &UpdateItemImage::default())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn delete_image_removes_only_that_image() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let a = store
        .create_image(owner.id, &image("http://x/a.png", false))
        .await
        .unwrap();
    let b = store
        .create_image(owner.id, &image("http://x/b.png", false))
        .await
        .unwrap();

    assert!(store.delete_image(owner.id, a.id).await.unwrap());
    assert!(store.find_image(owner.id, a.id).await.unwrap().is_none());
    assert!(store.find_image(owner.id, b.id).await.unwrap().is_some());
}

#[tokio::test]
async fn concurrent_primary_promotions_leave_exactly_one_primary() {
    let store = MemoryCatalogStore::new();
    let owner = store.create_item(&item("A", 1.0, "Tools")).await.unwrap();
    let a = store
        .create_image(owner.id, &image("http://x/a.png", false))
        .await
        .unwrap();
    let b = store
        .create_image(owner.id, &image("http://x/b.png", false))
        .await
        .unwrap();

    // Promote both images at once; whichever write lands second must
    // demote the other, never leaving two primaries.
    let promote = UpdateItemImage {
        is_primary: Some(true),
        ..Default::default()
    };
    let (first, second) = tokio::join!(
        store.update_image(owner.id, a.id, &promote),
        store.update_image(owner.id, b.id, &promote),
    );
    assert!(first.unwrap().unwrap().is_primary);
    assert!(second.unwrap().unwrap().is_primary);

    let primaries = store
        .list_images(owner.id, Some(true), None, 0)
        .await
        .unwrap();
    assert_eq!(primaries.len(), 1);
}
