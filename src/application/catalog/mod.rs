//! Catalog requests and the handlers that serve them from a [`CatalogStore`].
//!
//! [`CatalogStore`]: crate::application::repos::CatalogStore

mod handlers;
mod requests;

pub use handlers::CatalogHandlers;
pub use requests::{CreateCommand, DeleteCommand, GetAllQuery, GetByIdQuery, UpdateCommand};
