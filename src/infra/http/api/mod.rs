pub mod error;
pub mod handlers;
pub mod state;

pub use state::ApiState;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::admin::CatalogEndpoint;
use crate::domain::types::{Catalog, CatalogKind};

/// Routes for one catalog, mounted under its kind prefix.
fn catalog_router<C: Catalog>(endpoint: Arc<CatalogEndpoint<C>>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::list_entries::<C>).post(handlers::create_entry::<C>),
        )
        .route(
            "/{id}",
            get(handlers::get_entry::<C>)
                .put(handlers::update_entry::<C>)
                .delete(handlers::delete_entry::<C>),
        )
        .route("/cache/clear", post(handlers::clear_cache::<C>))
        .with_state(endpoint)
}

pub fn build_api_router(state: &ApiState) -> Router {
    let catalogs = &state.catalogs;
    Router::new()
        .nest(
            &format!("/{}", CatalogKind::Body.as_str()),
            catalog_router(catalogs.body.clone()),
        )
        .nest(
            &format!("/{}", CatalogKind::Drive.as_str()),
            catalog_router(catalogs.drive.clone()),
        )
        .nest(
            &format!("/{}", CatalogKind::Fuel.as_str()),
            catalog_router(catalogs.fuel.clone()),
        )
}
