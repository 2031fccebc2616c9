//! Catalog kinds and the type tags that parametrize the generic pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The reference tables managed by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Body,
    Drive,
    Fuel,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Body, CatalogKind::Drive, CatalogKind::Fuel];

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Body => "body",
            CatalogKind::Drive => "drive",
            CatalogKind::Fuel => "fuel",
        }
    }

    /// Backing table for the Postgres store.
    pub fn table_name(self) -> &'static str {
        match self {
            CatalogKind::Body => "body_types",
            CatalogKind::Drive => "drive_types",
            CatalogKind::Fuel => "fuel_types",
        }
    }

    /// Human readable label used in log lines and error messages.
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Body => "car body type",
            CatalogKind::Drive => "drive type",
            CatalogKind::Fuel => "fuel type",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compile-time tag selecting one catalog.
///
/// Requests, handlers and endpoints are generic over a tag so that each
/// catalog gets its own request types (and therefore its own handler
/// registrations) without duplicating code.
pub trait Catalog: fmt::Debug + Send + Sync + 'static {
    const KIND: CatalogKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuel {}

impl Catalog for Body {
    const KIND: CatalogKind = CatalogKind::Body;
}

impl Catalog for Drive {
    const KIND: CatalogKind = CatalogKind::Drive;
}

impl Catalog for Fuel {
    const KIND: CatalogKind = CatalogKind::Fuel;
}
