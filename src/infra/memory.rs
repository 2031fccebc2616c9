//! In-process catalog store used when no database is configured.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::repos::{CatalogStore, RepoError};
use crate::domain::entities::CatalogEntry;
use crate::util::lock::{rw_read, rw_write};

const SOURCE: &str = "infra::memory";

#[derive(Debug)]
struct Rows {
    next_id: i32,
    entries: BTreeMap<i32, String>,
}

/// Catalog table kept in memory. Ids start at 1, increase monotonically and
/// are never reused; listings are ordered by id.
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    rows: RwLock<Rows>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                next_id: 1,
                entries: BTreeMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        rw_read(&self.rows, SOURCE, "len").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn create(&self, name: &str) -> Result<i32, RepoError> {
        let mut rows = rw_write(&self.rows, SOURCE, "create");
        let id = rows.next_id;
        rows.next_id = id
            .checked_add(1)
            .ok_or_else(|| RepoError::from_persistence("catalog id space exhausted"))?;
        rows.entries.insert(id, name.to_string());
        Ok(id)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<CatalogEntry>, RepoError> {
        let rows = rw_read(&self.rows, SOURCE, "get_by_id");
        Ok(rows
            .entries
            .get(&id)
            .map(|name| CatalogEntry::new(id, name.clone())))
    }

    async fn get_all(&self) -> Result<Vec<CatalogEntry>, RepoError> {
        let rows = rw_read(&self.rows, SOURCE, "get_all");
        Ok(rows
            .entries
            .iter()
            .map(|(id, name)| CatalogEntry::new(*id, name.clone()))
            .collect())
    }

    async fn update(&self, id: i32, name: &str) -> Result<(), RepoError> {
        let mut rows = rw_write(&self.rows, SOURCE, "update");
        let slot = rows.entries.get_mut(&id).ok_or(RepoError::NotFound)?;
        *slot = name.to_string();
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut rows = rw_write(&self.rows, SOURCE, "delete");
        rows.entries
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }

    async fn delete_named(&self, id: i32, name: &str) -> Result<(), RepoError> {
        let mut rows = rw_write(&self.rows, SOURCE, "delete_named");
        match rows.entries.get(&id) {
            None => Err(RepoError::NotFound),
            Some(stored) if stored != name => Err(RepoError::NameMismatch {
                stored: stored.clone(),
            }),
            Some(_) => {
                rows.entries.remove(&id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_are_assigned_sequentially_and_not_reused() {
        let store = InMemoryCatalogStore::new();
        let first = store.create("Petrol").await.unwrap();
        let second = store.create("Diesel").await.unwrap();
        store.delete(second).await.unwrap();
        let third = store.create("Electric").await.unwrap();

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(
            store.get_all().await.unwrap(),
            vec![CatalogEntry::new(1, "Petrol"), CatalogEntry::new(3, "Electric")]
        );
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = InMemoryCatalogStore::new();
        assert!(matches!(
            store.update(1, "AWD").await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(store.delete(1).await, Err(RepoError::NotFound)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn named_delete_keeps_renamed_rows() {
        let store = InMemoryCatalogStore::new();
        let id = store.create("Hatchback").await.unwrap();

        assert!(matches!(
            store.delete_named(id, "Estate").await,
            Err(RepoError::NameMismatch { stored }) if stored == "Hatchback"
        ));
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.delete_named(id + 1, "Hatchback").await,
            Err(RepoError::NotFound)
        ));

        store.delete_named(id, "Hatchback").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_are_allowed() {
        let store = InMemoryCatalogStore::new();
        store.create("FWD").await.unwrap();
        store.create("FWD").await.unwrap();
        assert_eq!(store.len(), 2);
    }
}
