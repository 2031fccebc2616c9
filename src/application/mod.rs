//! Application services layer: dispatch, catalog handlers and endpoints.

pub mod admin;
pub mod catalog;
pub mod context;
pub mod error;
pub mod mediator;
pub mod repos;
