//! Strongly-typed identifiers used across the domain.
//!
//! The backend owns identity and hands out opaque string ids (document ids);
//! the client never mints them. An inventory id is interpolated into request
//! paths, so parsing guarantees it stays inside one path segment. Product ids
//! are display data and only have to be non-empty.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an inventory count document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryId(String);

/// Identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

fn non_empty(raw: &str, name: &str) -> Result<(), DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::invalid_id(format!("{name}: empty")));
    }
    Ok(())
}

fn path_segment(raw: &str, name: &str) -> Result<(), DomainError> {
    non_empty(raw, name)?;
    // `.` and `..` are resolved away by URL joining.
    if raw == "." || raw == ".." {
        return Err(DomainError::invalid_id(format!("{name}: {raw:?} is not a document id")));
    }
    if raw
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(DomainError::invalid_id(format!(
            "{name}: unexpected character in {raw:?}"
        )));
    }
    Ok(())
}

macro_rules! impl_string_id {
    ($t:ty, $name:literal, $validate:path) => {
        impl $t {
            /// Parse an identifier received from the backend or the user.
            pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
                let raw = raw.into();
                $validate(&raw, $name)?;
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.pad(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_id!(InventoryId, "InventoryId", path_segment);
impl_string_id!(ProductId, "ProductId", non_empty);
