//! Request values for one catalog. The type tag `C` selects the catalog, so
//! `GetAllQuery<Body>` and `GetAllQuery<Fuel>` are routed to different handlers.

use std::marker::PhantomData;

use crate::application::mediator::Request;
use crate::domain::entities::CatalogEntry;
use crate::domain::types::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetAllQuery<C> {
    catalog: PhantomData<C>,
}

impl<C: Catalog> GetAllQuery<C> {
    pub fn new() -> Self {
        Self {
            catalog: PhantomData,
        }
    }
}

impl<C: Catalog> Default for GetAllQuery<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Catalog> Request for GetAllQuery<C> {
    type Response = Vec<CatalogEntry>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetByIdQuery<C> {
    pub id: i32,
    catalog: PhantomData<C>,
}

impl<C: Catalog> GetByIdQuery<C> {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            catalog: PhantomData,
        }
    }
}

impl<C: Catalog> Request for GetByIdQuery<C> {
    type Response = Option<CatalogEntry>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommand<C> {
    pub name: String,
    catalog: PhantomData<C>,
}

impl<C: Catalog> CreateCommand<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: PhantomData,
        }
    }
}

/// Responds with the id assigned by the store.
impl<C: Catalog> Request for CreateCommand<C> {
    type Response = i32;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCommand<C> {
    pub id: i32,
    pub name: String,
    catalog: PhantomData<C>,
}

impl<C: Catalog> UpdateCommand<C> {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            catalog: PhantomData,
        }
    }
}

impl<C: Catalog> Request for UpdateCommand<C> {
    type Response = ();
}

/// Deletes by id. A present `name` is only cross-checked against the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand<C> {
    pub id: i32,
    pub name: Option<String>,
    catalog: PhantomData<C>,
}

impl<C: Catalog> DeleteCommand<C> {
    pub fn new(id: i32, name: Option<String>) -> Self {
        Self {
            id,
            name,
            catalog: PhantomData,
        }
    }
}

impl<C: Catalog> Request for DeleteCommand<C> {
    type Response = ();
}
