//! Per-catalog cache slots with an explicit lifecycle.
//!
//! Created empty at startup, handed to each endpoint, and dropped with the
//! application context at shutdown.

use std::sync::Arc;

use crate::domain::entities::CatalogEntry;
use crate::domain::types::{Catalog, CatalogKind};

use super::config::CacheConfig;
use super::slot::CacheSlot;

/// Cache of one catalog's full listing.
pub type CatalogCache = CacheSlot<Vec<CatalogEntry>>;

/// One independent [`CatalogCache`] per catalog kind.
#[derive(Clone)]
pub struct CatalogCaches {
    body: Arc<CatalogCache>,
    drive: Arc<CatalogCache>,
    fuel: Arc<CatalogCache>,
}

impl CatalogCaches {
    pub fn new(config: &CacheConfig) -> Self {
        let slot = |kind| Arc::new(CatalogCache::new(kind, config.clone()));
        Self {
            body: slot(CatalogKind::Body),
            drive: slot(CatalogKind::Drive),
            fuel: slot(CatalogKind::Fuel),
        }
    }

    pub fn get(&self, kind: CatalogKind) -> Arc<CatalogCache> {
        let slot = match kind {
            CatalogKind::Body => &self.body,
            CatalogKind::Drive => &self.drive,
            CatalogKind::Fuel => &self.fuel,
        };
        Arc::clone(slot)
    }

    pub fn for_catalog<C: Catalog>(&self) -> Arc<CatalogCache> {
        self.get(C::KIND)
    }

    /// Invalidate every catalog.
    pub async fn clear_all(&self) {
        for kind in CatalogKind::ALL {
            self.get(kind).invalidate().await;
        }
    }
}
