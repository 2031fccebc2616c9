use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;
use crate::domain::types::CatalogKind;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Catalog addressed by the first path segment, if any.
    pub catalog: Option<CatalogKind>,
}

fn catalog_for_path(path: &str) -> Option<CatalogKind> {
    let segment = path.trim_start_matches('/').split('/').next()?;
    CatalogKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == segment)
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let ctx = RequestContext {
        request_id: request_id.clone(),
        catalog: catalog_for_path(request.uri().path()),
    };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let (request_id, catalog) = request
        .extensions()
        .get::<RequestContext>()
        .map(|ctx| (ctx.request_id.clone(), ctx.catalog))
        .unwrap_or_default();
    let catalog = catalog.map_or("none", CatalogKind::as_str);

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let elapsed_ms = start.elapsed().as_millis();
        let report = response.extensions_mut().remove::<ErrorReport>();
        let (source, messages) = match report {
            Some(report) => (report.source, report.messages),
            None => ("unknown", Vec::new()),
        };
        let detail = messages
            .first()
            .cloned()
            .unwrap_or_else(|| "no diagnostic available".to_string());

        if status.is_server_error() {
            error!(
                target = "carapp::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                catalog = catalog,
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "request failed",
            );
        } else {
            warn!(
                target = "carapp::http::response",
                status = status.as_u16(),
                method = %method,
                path = %uri.path(),
                catalog = catalog,
                elapsed_ms = elapsed_ms,
                source = source,
                detail = %detail,
                chain = ?messages,
                request_id = request_id,
                "client request error",
            );
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_taken_from_the_first_segment() {
        assert_eq!(catalog_for_path("/fuel"), Some(CatalogKind::Fuel));
        assert_eq!(catalog_for_path("/body/12"), Some(CatalogKind::Body));
        assert_eq!(catalog_for_path("/drive/cache/clear"), Some(CatalogKind::Drive));
        assert_eq!(catalog_for_path("/health"), None);
        assert_eq!(catalog_for_path("/"), None);
    }
}
