//! Domain entities mirrored from persistent storage.

use serde::Serialize;

/// One row of a catalog. The id is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: i32,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
