//! Route definitions for items and their nested images.
//!
//! Mounted at `/items` by `app_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{images, items};
use crate::state::AppState;

/// Item and item-image routes.
///
/// ```text
/// GET    /                              -> list_items
/// POST   /                              -> create_item
/// GET    /{item_id}                     -> get_item
/// PUT    /{item_id}                     -> update_item
/// DELETE /{item_id}                     -> delete_item
/// GET    /category/{category}           -> list_items_by_category
/// GET    /status/{status}               -> list_items_by_status
/// GET    /{item_id}/images              -> list_images
/// POST   /{item_id}/images              -> create_image
/// GET    /{item_id}/images/{image_id}   -> get_image
/// PUT    /{item_id}/images/{image_id}   -> update_image
/// DELETE /{item_id}/images/{image_id}   -> delete_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route(
            "/{item_id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/category/{category}", get(items::list_items_by_category))
        .route("/status/{status}", get(items::list_items_by_status))
        .route(
            "/{item_id}/images",
            get(images::list_images).post(images::create_image),
        )
        .route(
            "/{item_id}/images/{image_id}",
            get(images::get_image)
                .put(images::update_image)
                .delete(images::delete_image),
        )
}
