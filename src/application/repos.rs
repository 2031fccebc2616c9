//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::CatalogEntry;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("database timeout")]
    Timeout,
    #[error("row is named `{stored}`")]
    NameMismatch { stored: String },
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Persistence for a single catalog table.
///
/// Each catalog kind owns its own store instance; implementations never
/// share rows between kinds.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert a row and return the id the store assigned to it.
    async fn create(&self, name: &str) -> Result<i32, RepoError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<CatalogEntry>, RepoError>;

    /// All rows in store-defined order.
    async fn get_all(&self) -> Result<Vec<CatalogEntry>, RepoError>;

    /// Overwrite the name of an existing row, `RepoError::NotFound` if absent.
    async fn update(&self, id: i32, name: &str) -> Result<(), RepoError>;

    /// Remove a row, `RepoError::NotFound` if absent.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// Remove a row only while it is still named `name`, in one step.
    /// `RepoError::NameMismatch` carries the stored name when it differs.
    async fn delete_named(&self, id: i32, name: &str) -> Result<(), RepoError>;
}
