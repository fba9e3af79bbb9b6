//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (optional fields) for partial updates

pub mod item;
pub mod item_image;

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable patch field into `Some(value)` when the field is
/// present (including an explicit null). Combined with `#[serde(default)]`,
/// an absent field stays `None`, so updates can tell "leave unchanged"
/// apart from "set to null".
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}
