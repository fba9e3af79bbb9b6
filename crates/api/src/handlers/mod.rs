//! Request handlers.
//!
//! Each submodule provides async handler functions for one concern.
//! Handlers validate input, delegate to the [`CatalogStore`] backend in
//! `catalog_db`, and map errors via [`AppError`].
//!
//! [`CatalogStore`]: catalog_db::store::CatalogStore
//! [`AppError`]: crate::error::AppError

pub mod health;
pub mod images;
pub mod items;
pub mod uploads;

use serde::Serialize;

/// Confirmation payload for delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
