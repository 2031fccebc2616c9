use async_trait::async_trait;

use crate::application::repos::{CatalogStore, RepoError};
use crate::domain::entities::CatalogEntry;
use crate::domain::types::CatalogKind;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CatalogRow {
    id: i32,
    name: String,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Catalog table in Postgres; the table is chosen by the catalog kind.
#[derive(Clone)]
pub struct PostgresCatalogStore {
    repositories: PostgresRepositories,
    table: &'static str,
}

impl PostgresCatalogStore {
    pub fn new(repositories: PostgresRepositories, kind: CatalogKind) -> Self {
        Self {
            repositories,
            table: kind.table_name(),
        }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn create(&self, name: &str) -> Result<i32, RepoError> {
        let sql = format!("INSERT INTO {} (name) VALUES ($1) RETURNING id", self.table);
        sqlx::query_scalar::<_, i32>(&sql)
            .bind(name)
            .fetch_one(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<CatalogEntry>, RepoError> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", self.table);
        let row = sqlx::query_as::<_, CatalogRow>(&sql)
            .bind(id)
            .fetch_optional(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(CatalogEntry::from))
    }

    async fn get_all(&self) -> Result<Vec<CatalogEntry>, RepoError> {
        let sql = format!("SELECT id, name FROM {} ORDER BY id", self.table);
        let rows = sqlx::query_as::<_, CatalogRow>(&sql)
            .fetch_all(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }

    async fn update(&self, id: i32, name: &str) -> Result<(), RepoError> {
        let sql = format!("UPDATE {} SET name = $2 WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(name)
            .execute(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_named(&self, id: i32, name: &str) -> Result<(), RepoError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND name = $2", self.table);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(name)
            .execute(self.repositories.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Nothing matched: tell a missing row apart from a renamed one.
        match self.get_by_id(id).await? {
            Some(entry) => Err(RepoError::NameMismatch { stored: entry.name }),
            None => Err(RepoError::NotFound),
        }
    }
}
