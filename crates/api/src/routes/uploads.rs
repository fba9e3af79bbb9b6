//! Route definitions for the image asset handler.
//!
//! Uploads are accepted at `/upload-image`; stored files are served back
//! from the upload directory at `/images/{filename}` (404 when absent).

use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::handlers::uploads;
use crate::state::AppState;

/// Upload and file-serving routes.
pub fn router(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .route("/upload-image", post(uploads::upload_image))
        .nest_service("/images", ServeDir::new(&config.upload_dir))
}
