//! Item status vocabulary and domain validation helpers.
//!
//! The status set is a closed enum validated at the API boundary; the
//! store layers only ever see well-formed values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use crate::error::CoreError;

/// Lifecycle status of a catalog item.
///
/// Stored as lowercase text; any status may replace any other (there are
/// no transition rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl ItemStatus {
    /// The lowercase wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Reserved => "reserved",
            ItemStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ItemStatus::Available),
            "reserved" => Ok(ItemStatus::Reserved),
            "sold" => Ok(ItemStatus::Sold),
            other => Err(CoreError::Validation(format!(
                "Invalid item status '{other}'. Must be one of: available, reserved, sold"
            ))),
        }
    }
}

/// Validate that an image URL is a well-formed http(s) URL.
pub fn validate_image_url(url: &str) -> Result<(), CoreError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(CoreError::Validation(format!(
            "Image URL '{url}' must use the http or https scheme"
        )));
    }
    if !url.validate_url() {
        return Err(CoreError::Validation(format!(
            "Image URL '{url}' is not a well-formed URL"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for (s, expected) in [
            ("available", ItemStatus::Available),
            ("reserved", ItemStatus::Reserved),
            ("sold", ItemStatus::Sold),
        ] {
            let parsed: ItemStatus = s.parse().unwrap();
            assert_eq!(parsed, expected);
            assert_eq!(parsed.as_str(), s);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("pending".parse::<ItemStatus>().is_err());
        assert!("Available".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn default_status_is_available() {
        assert_eq!(ItemStatus::default(), ItemStatus::Available);
    }

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_image_url("http://example.com/a.png").is_ok());
        assert!(validate_image_url("https://cdn.example.com/x/b.jpg").is_ok());
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(validate_image_url("not-a-url").is_err());
        assert!(validate_image_url("ftp://example.com/a.png").is_err());
        assert!(validate_image_url("http://").is_err());
    }
}
