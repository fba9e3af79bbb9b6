//! Pagination constants and validation helpers.
//!
//! Lives in `core` so both the API handlers and the store backends agree
//! on the same limits. Out-of-range values are a validation error, not
//! silently adjusted.

use crate::error::CoreError;

/// Default number of items per page when the client sends no `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Maximum number of items per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Validate a requested page limit, falling back to [`DEFAULT_PAGE_LIMIT`]
/// when the client sent none. Values outside `[1, MAX_PAGE_LIMIT]` are
/// rejected.
pub fn validate_limit(requested: Option<i64>) -> Result<i64, CoreError> {
    match requested {
        None => Ok(DEFAULT_PAGE_LIMIT),
        Some(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => Ok(limit),
        Some(limit) => Err(CoreError::Validation(format!(
            "Limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"
        ))),
    }
}

/// Validate a requested offset, defaulting to 0. Negative offsets are
/// rejected.
pub fn validate_offset(requested: Option<i64>) -> Result<i64, CoreError> {
    match requested {
        None => Ok(0),
        Some(offset) if offset >= 0 => Ok(offset),
        Some(offset) => Err(CoreError::Validation(format!(
            "Offset must be non-negative, got {offset}"
        ))),
    }
}
