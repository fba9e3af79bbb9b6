pub mod health;
pub mod items;
pub mod uploads;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the root-mounted route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                      welcome message
/// /health                                service + store health
///
/// /items                                 list, create
/// /items/{item_id}                       get, update, delete (cascades)
/// /items/category/{category}             all items in category
/// /items/status/{status}                 all items with status
/// /items/{item_id}/images                list, create
/// /items/{item_id}/images/{image_id}     get, update, delete
///
/// /upload-image                          multipart file upload (POST)
/// /images/{filename}                     serve uploaded file
/// ```
pub fn app_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/items", items::router())
        .merge(uploads::router(config))
}
