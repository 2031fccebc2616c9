//! Application services for the administrative surface.

pub mod catalogs;

pub use catalogs::{CatalogEndpoint, CatalogEndpoints, CatalogError};
