//! Vehicle catalog administration: cached reads over mediated CRUD for the
//! body, drive and fuel type catalogs.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
mod util;
