//! Catalog handlers, generic over the catalog they serve.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use carapp_api_types::{
    CatalogDeleteRequest, CatalogEntryResponse, CatalogNameRequest, CreatedResponse,
};

use crate::application::admin::CatalogEndpoint;
use crate::domain::entities::CatalogEntry;
use crate::domain::types::Catalog;

use super::error::ApiError;

type Endpoint<C> = State<Arc<CatalogEndpoint<C>>>;

fn entry_to_api(entry: &CatalogEntry) -> CatalogEntryResponse {
    CatalogEntryResponse {
        id: entry.id,
        name: entry.name.clone(),
    }
}

pub async fn list_entries<C: Catalog>(
    State(endpoint): Endpoint<C>,
) -> Result<Json<Vec<CatalogEntryResponse>>, ApiError> {
    let entries = endpoint.list().await?;
    Ok(Json(entries.iter().map(entry_to_api).collect()))
}

pub async fn get_entry<C: Catalog>(
    State(endpoint): Endpoint<C>,
    Path(id): Path<i32>,
) -> Result<Json<CatalogEntryResponse>, ApiError> {
    let entry = endpoint.find(id).await?;
    Ok(Json(entry_to_api(&entry)))
}

pub async fn create_entry<C: Catalog>(
    State(endpoint): Endpoint<C>,
    Json(payload): Json<CatalogNameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = endpoint.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn update_entry<C: Catalog>(
    State(endpoint): Endpoint<C>,
    Path(id): Path<i32>,
    Json(payload): Json<CatalogNameRequest>,
) -> Result<StatusCode, ApiError> {
    endpoint.update(id, &payload.name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Name to check before deleting, read from the raw body so that a missing
/// `Content-Type` cannot turn a checked delete into an unchecked one.
fn delete_guard(body: &Bytes) -> Result<Option<String>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let request: CatalogDeleteRequest = serde_json::from_slice(body)
        .map_err(|err| ApiError::malformed_body(err.to_string()))?;
    Ok(request.name)
}

pub async fn delete_entry<C: Catalog>(
    State(endpoint): Endpoint<C>,
    Path(id): Path<i32>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    match delete_guard(&body)? {
        Some(name) => endpoint.delete_checked(id, &name).await?,
        None => endpoint.delete(id).await?,
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_cache<C: Catalog>(State(endpoint): Endpoint<C>) -> StatusCode {
    endpoint.clear_cache().await;
    StatusCode::NO_CONTENT
}
