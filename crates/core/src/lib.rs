//! Catalog domain layer.
//!
//! Shared types, the item status vocabulary, validation helpers, and the
//! domain error type. This crate has no internal dependencies so it can be
//! used by both the persistence and API layers.

pub mod error;
pub mod item;
pub mod pagination;
pub mod types;
