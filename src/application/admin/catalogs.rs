use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::catalog::{
    CreateCommand, DeleteCommand, GetAllQuery, GetByIdQuery, UpdateCommand,
};
use crate::application::mediator::{HandlerError, Mediator};
use crate::application::repos::RepoError;
use crate::cache::{CatalogCache, CatalogCaches};
use crate::domain::entities::CatalogEntry;
use crate::domain::error::ValidationError;
use crate::domain::types::{Body, Catalog, Drive, Fuel};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("{0}")]
    Conflict(String),
    #[error("catalog store unavailable")]
    StoreUnavailable(#[source] RepoError),
    #[error("request dispatch misconfigured: {0}")]
    Misconfigured(#[source] HandlerError),
}

impl From<HandlerError> for CatalogError {
    fn from(err: HandlerError) -> Self {
        match err {
            HandlerError::NotFound { entity, id } => CatalogError::NotFound { entity, id },
            HandlerError::Conflict(message) => CatalogError::Conflict(message),
            HandlerError::Repo(err) => CatalogError::StoreUnavailable(err),
            err @ HandlerError::Unregistered { .. } => CatalogError::Misconfigured(err),
        }
    }
}

/// Entry point for one catalog: reads through the list cache, writes
/// through the mediator followed by cache invalidation.
pub struct CatalogEndpoint<C> {
    mediator: Arc<Mediator>,
    cache: Arc<CatalogCache>,
    catalog: PhantomData<fn() -> C>,
}

impl<C: Catalog> CatalogEndpoint<C> {
    pub fn new(mediator: Arc<Mediator>, cache: Arc<CatalogCache>) -> Self {
        Self {
            mediator,
            cache,
            catalog: PhantomData,
        }
    }

    /// All entries, served from cache while it is live.
    pub async fn list(&self) -> Result<Arc<Vec<CatalogEntry>>, CatalogError> {
        let started = Instant::now();
        let entries = self
            .cache
            .get_or_load(|| self.mediator.send(GetAllQuery::<C>::new()))
            .await?;

        info!(
            catalog = %C::KIND,
            count = entries.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog listing served"
        );
        Ok(entries)
    }

    /// Existence check before presenting a record for editing or deletion.
    pub async fn find(&self, id: i32) -> Result<CatalogEntry, CatalogError> {
        if id <= 0 {
            return Err(self.not_found(id));
        }

        self.mediator
            .send(GetByIdQuery::<C>::new(id))
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn create(&self, name: &str) -> Result<i32, CatalogError> {
        let mut errors = ValidationError::new();
        let name = validate_name(name, &mut errors);
        errors.into_result()?;

        let id = self.mediator.send(CreateCommand::<C>::new(name)).await?;
        self.cache.invalidate().await;

        info!(catalog = %C::KIND, id, "catalog entry created");
        Ok(id)
    }

    pub async fn update(&self, id: i32, name: &str) -> Result<(), CatalogError> {
        let mut errors = ValidationError::new();
        validate_id(id, &mut errors);
        let name = validate_name(name, &mut errors);
        errors.into_result()?;

        self.mediator
            .send(UpdateCommand::<C>::new(id, name))
            .await?;
        self.cache.invalidate().await;

        info!(catalog = %C::KIND, id, "catalog entry updated");
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let mut errors = ValidationError::new();
        validate_id(id, &mut errors);
        errors.into_result()?;

        self.dispatch_delete(id, None).await
    }

    /// Delete only if the stored name still equals `name`. A blank name is
    /// rejected rather than compared.
    pub async fn delete_checked(&self, id: i32, name: &str) -> Result<(), CatalogError> {
        let mut errors = ValidationError::new();
        validate_id(id, &mut errors);
        let name = validate_name(name, &mut errors);
        errors.into_result()?;

        self.dispatch_delete(id, Some(name)).await
    }

    /// Drop the cached listing without a write, for operational use.
    pub async fn clear_cache(&self) {
        self.cache.invalidate().await;
        info!(catalog = %C::KIND, "cleared catalog cache");
    }

    async fn dispatch_delete(&self, id: i32, name: Option<String>) -> Result<(), CatalogError> {
        let result = self.mediator.send(DeleteCommand::<C>::new(id, name)).await;
        if let Err(HandlerError::Conflict(reason)) = &result {
            warn!(catalog = %C::KIND, id, reason = %reason, "delete rejected");
        }
        result?;
        self.cache.invalidate().await;

        info!(catalog = %C::KIND, id, "catalog entry deleted");
        Ok(())
    }

    fn not_found(&self, id: i32) -> CatalogError {
        CatalogError::NotFound {
            entity: C::KIND.label(),
            id,
        }
    }
}

fn validate_id(id: i32, errors: &mut ValidationError) {
    if id <= 0 {
        errors.push("id", "must be a positive integer");
    }
}

fn validate_name(name: &str, errors: &mut ValidationError) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.push("name", "is required");
    }
    trimmed.to_string()
}

/// The three catalog endpoints sharing one mediator.
#[derive(Clone)]
pub struct CatalogEndpoints {
    pub body: Arc<CatalogEndpoint<Body>>,
    pub drive: Arc<CatalogEndpoint<Drive>>,
    pub fuel: Arc<CatalogEndpoint<Fuel>>,
}

impl CatalogEndpoints {
    pub fn new(mediator: Arc<Mediator>, caches: &CatalogCaches) -> Self {
        Self {
            body: Arc::new(CatalogEndpoint::new(
                mediator.clone(),
                caches.for_catalog::<Body>(),
            )),
            drive: Arc::new(CatalogEndpoint::new(
                mediator.clone(),
                caches.for_catalog::<Drive>(),
            )),
            fuel: Arc::new(CatalogEndpoint::new(mediator, caches.for_catalog::<Fuel>())),
        }
    }
}
