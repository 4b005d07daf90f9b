//! Strongly-typed identifiers.
//!
//! Products and bundles are keyed by name; these ids only tag a catalog
//! instance and the interactive session that owns it (for logs and journals).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(Uuid);

/// Identifier of an interactive session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty) => {
        impl $t {
            /// Create a new identifier (UUIDv7, time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

impl_uuid_newtype!(CatalogId);
impl_uuid_newtype!(SessionId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(CatalogId::new(), CatalogId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn display_matches_uuid() {
        let uuid = Uuid::now_v7();
        assert_eq!(SessionId::from_uuid(uuid).to_string(), uuid.to_string());
        assert_eq!(CatalogId::from_uuid(uuid).as_uuid(), &uuid);
    }
}
