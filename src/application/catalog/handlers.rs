use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::mediator::{HandlerError, MediatorBuilder, RequestHandler};
use crate::application::repos::{CatalogStore, RepoError};
use crate::domain::entities::CatalogEntry;
use crate::domain::types::Catalog;

use super::requests::{CreateCommand, DeleteCommand, GetAllQuery, GetByIdQuery, UpdateCommand};

/// Query and command handlers for catalog `C`, all backed by one store.
pub struct CatalogHandlers<C> {
    store: Arc<dyn CatalogStore>,
    catalog: PhantomData<fn() -> C>,
}

impl<C: Catalog> CatalogHandlers<C> {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            catalog: PhantomData,
        }
    }

    fn not_found(id: i32) -> HandlerError {
        HandlerError::NotFound {
            entity: C::KIND.label(),
            id,
        }
    }

    fn map_missing(id: i32) -> impl FnOnce(RepoError) -> HandlerError {
        move |err| match err {
            RepoError::NotFound => Self::not_found(id),
            other => HandlerError::from(other),
        }
    }
}

#[async_trait]
impl<C: Catalog> RequestHandler<GetAllQuery<C>> for CatalogHandlers<C> {
    async fn handle(&self, _request: GetAllQuery<C>) -> Result<Vec<CatalogEntry>, HandlerError> {
        Ok(self.store.get_all().await?)
    }
}

#[async_trait]
impl<C: Catalog> RequestHandler<GetByIdQuery<C>> for CatalogHandlers<C> {
    async fn handle(&self, request: GetByIdQuery<C>) -> Result<Option<CatalogEntry>, HandlerError> {
        Ok(self.store.get_by_id(request.id).await?)
    }
}

#[async_trait]
impl<C: Catalog> RequestHandler<CreateCommand<C>> for CatalogHandlers<C> {
    async fn handle(&self, request: CreateCommand<C>) -> Result<i32, HandlerError> {
        let id = self.store.create(&request.name).await?;
        debug!(catalog = %C::KIND, id, "catalog entry created");
        Ok(id)
    }
}

#[async_trait]
impl<C: Catalog> RequestHandler<UpdateCommand<C>> for CatalogHandlers<C> {
    async fn handle(&self, request: UpdateCommand<C>) -> Result<(), HandlerError> {
        self.store
            .update(request.id, &request.name)
            .await
            .map_err(Self::map_missing(request.id))?;
        debug!(catalog = %C::KIND, id = request.id, "catalog entry updated");
        Ok(())
    }
}

#[async_trait]
impl<C: Catalog> RequestHandler<DeleteCommand<C>> for CatalogHandlers<C> {
    async fn handle(&self, request: DeleteCommand<C>) -> Result<(), HandlerError> {
        match request.name.as_deref() {
            Some(expected) => self
                .store
                .delete_named(request.id, expected)
                .await
                .map_err(|err| match err {
                    RepoError::NameMismatch { stored } => HandlerError::Conflict(format!(
                        "{} {} is named `{}`, not `{}`",
                        C::KIND.label(),
                        request.id,
                        stored,
                        expected
                    )),
                    other => Self::map_missing(request.id)(other),
                })?,
            None => self
                .store
                .delete(request.id)
                .await
                .map_err(Self::map_missing(request.id))?,
        }
        debug!(catalog = %C::KIND, id = request.id, "catalog entry deleted");
        Ok(())
    }
}

impl MediatorBuilder {
    /// Register and require all five catalog requests for `C`, served by `store`.
    pub fn with_catalog<C: Catalog>(self, store: Arc<dyn CatalogStore>) -> Self {
        let handlers = Arc::new(CatalogHandlers::<C>::new(store));
        self.register_shared::<GetAllQuery<C>>(handlers.clone())
            .register_shared::<GetByIdQuery<C>>(handlers.clone())
            .register_shared::<CreateCommand<C>>(handlers.clone())
            .register_shared::<UpdateCommand<C>>(handlers.clone())
            .register_shared::<DeleteCommand<C>>(handlers)
            .require_catalog::<C>()
    }

    /// Require handlers for every catalog request of `C` without registering any.
    pub fn require_catalog<C: Catalog>(self) -> Self {
        self.require::<GetAllQuery<C>>()
            .require::<GetByIdQuery<C>>()
            .require::<CreateCommand<C>>()
            .require::<UpdateCommand<C>>()
            .require::<DeleteCommand<C>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mediator::{ConfigurationError, Mediator};
    use crate::domain::types::{Body, Drive, Fuel};
    use crate::infra::memory::InMemoryCatalogStore;

    fn mediator_with(store: Arc<InMemoryCatalogStore>) -> Mediator {
        Mediator::builder()
            .with_catalog::<Body>(store)
            .build()
            .expect("valid wiring")
    }

    #[tokio::test]
    async fn create_then_get_all_and_get_by_id() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let mediator = mediator_with(store);

        let id = mediator
            .send(CreateCommand::<Body>::new("Sedan"))
            .await
            .unwrap();

        let all = mediator.send(GetAllQuery::<Body>::new()).await.unwrap();
        assert_eq!(all, vec![CatalogEntry::new(id, "Sedan")]);

        let found = mediator.send(GetByIdQuery::<Body>::new(id)).await.unwrap();
        assert_eq!(found, Some(CatalogEntry::new(id, "Sedan")));
    }

    #[tokio::test]
    async fn get_by_id_absent_is_none() {
        let mediator = mediator_with(Arc::new(InMemoryCatalogStore::new()));
        let found = mediator.send(GetByIdQuery::<Body>::new(99)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let mediator = mediator_with(Arc::new(InMemoryCatalogStore::new()));
        let result = mediator.send(UpdateCommand::<Body>::new(7, "Coupe")).await;
        assert!(matches!(
            result,
            Err(HandlerError::NotFound { id: 7, .. })
        ));
    }

    #[tokio::test]
    async fn update_keeps_id_and_overwrites_name() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let mediator = mediator_with(store.clone());
        let id = mediator.send(CreateCommand::<Body>::new("SUV")).await.unwrap();

        mediator
            .send(UpdateCommand::<Body>::new(id, "Crossover"))
            .await
            .unwrap();

        assert_eq!(
            store.get_by_id(id).await.unwrap(),
            Some(CatalogEntry::new(id, "Crossover"))
        );
    }

    #[tokio::test]
    async fn delete_with_mismatched_name_is_rejected() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let mediator = mediator_with(store.clone());
        let id = mediator.send(CreateCommand::<Body>::new("Van")).await.unwrap();

        let result = mediator
            .send(DeleteCommand::<Body>::new(id, Some("Truck".into())))
            .await;
        assert!(matches!(result, Err(HandlerError::Conflict(_))));
        assert!(store.get_by_id(id).await.unwrap().is_some());

        mediator
            .send(DeleteCommand::<Body>::new(id, Some("Van".into())))
            .await
            .unwrap();
        assert!(store.get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn checked_delete_of_missing_row_is_not_found() {
        let mediator = mediator_with(Arc::new(InMemoryCatalogStore::new()));
        let result = mediator
            .send(DeleteCommand::<Body>::new(4, Some("Van".into())))
            .await;
        assert!(matches!(result, Err(HandlerError::NotFound { id: 4, .. })));
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let mediator = mediator_with(Arc::new(InMemoryCatalogStore::new()));
        let result = mediator.send(DeleteCommand::<Body>::new(3, None)).await;
        assert!(matches!(result, Err(HandlerError::NotFound { id: 3, .. })));
    }

    #[tokio::test]
    async fn catalogs_are_routed_to_their_own_store() {
        let body = Arc::new(InMemoryCatalogStore::new());
        let fuel = Arc::new(InMemoryCatalogStore::new());
        let mediator = Mediator::builder()
            .with_catalog::<Body>(body.clone())
            .with_catalog::<Fuel>(fuel.clone())
            .build()
            .unwrap();

        mediator.send(CreateCommand::<Fuel>::new("Diesel")).await.unwrap();

        assert!(body.get_all().await.unwrap().is_empty());
        assert_eq!(fuel.get_all().await.unwrap().len(), 1);
    }

    #[test]
    fn missing_catalog_wiring_fails_at_build() {
        let result = Mediator::builder()
            .with_catalog::<Body>(Arc::new(InMemoryCatalogStore::new()))
            .require_catalog::<Drive>()
            .build();
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingHandler { .. })
        ));
    }
}
