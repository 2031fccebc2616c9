use std::sync::Arc;

use tracing::info;

use crate::application::admin::CatalogEndpoints;
use crate::application::mediator::{ConfigurationError, Mediator};
use crate::application::repos::CatalogStore;
use crate::cache::{CacheConfig, CatalogCaches};
use crate::domain::types::{Body, CatalogKind, Drive, Fuel};
use crate::infra::db::{PostgresCatalogStore, PostgresRepositories};
use crate::infra::memory::InMemoryCatalogStore;

/// One backing store per catalog.
#[derive(Clone)]
pub struct CatalogStores {
    pub body: Arc<dyn CatalogStore>,
    pub drive: Arc<dyn CatalogStore>,
    pub fuel: Arc<dyn CatalogStore>,
}

impl CatalogStores {
    pub fn in_memory() -> Self {
        Self {
            body: Arc::new(InMemoryCatalogStore::new()),
            drive: Arc::new(InMemoryCatalogStore::new()),
            fuel: Arc::new(InMemoryCatalogStore::new()),
        }
    }

    pub fn postgres(repositories: &PostgresRepositories) -> Self {
        let store = |kind| -> Arc<dyn CatalogStore> {
            Arc::new(PostgresCatalogStore::new(repositories.clone(), kind))
        };
        Self {
            body: store(CatalogKind::Body),
            drive: store(CatalogKind::Drive),
            fuel: store(CatalogKind::Fuel),
        }
    }
}

/// Everything the HTTP layer needs, built once at startup.
#[derive(Clone)]
pub struct ApplicationContext {
    pub mediator: Arc<Mediator>,
    pub caches: CatalogCaches,
    pub catalogs: CatalogEndpoints,
}

impl ApplicationContext {
    /// Wires every catalog request to its handler. Fails if any of the
    /// fifteen request types ends up without exactly one handler.
    pub fn build(stores: CatalogStores, cache: &CacheConfig) -> Result<Self, ConfigurationError> {
        let mediator = Mediator::builder()
            .with_catalog::<Body>(stores.body)
            .with_catalog::<Drive>(stores.drive)
            .with_catalog::<Fuel>(stores.fuel)
            .build()?;
        let mediator = Arc::new(mediator);

        let caches = CatalogCaches::new(cache);
        let catalogs = CatalogEndpoints::new(mediator.clone(), &caches);

        info!(
            requests = mediator.requests().len(),
            sliding_secs = cache.sliding_expiration.as_secs(),
            absolute_secs = cache.absolute_expiration.as_secs(),
            priority = %cache.priority,
            "application context ready"
        );

        Ok(Self {
            mediator,
            caches,
            catalogs,
        })
    }
}
