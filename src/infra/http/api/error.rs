use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use carapp_api_types::{ApiErrorBody, ApiErrorMessage, FieldErrorBody};

use crate::application::admin::CatalogError;
use crate::application::error::ErrorReport;
use crate::domain::error::ValidationError;

pub mod codes {
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const MALFORMED_BODY: &str = "malformed_body";
    pub const NOT_FOUND: &str = "not_found";
    pub const NAME_MISMATCH: &str = "name_mismatch";
    pub const STORE_UNAVAILABLE: &str = "store_unavailable";
    pub const INTERNAL: &str = "internal_error";
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    fields: Vec<FieldErrorBody>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            fields: Vec::new(),
        }
    }

    pub fn invalid_input(errors: &ValidationError) -> Self {
        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_INPUT,
            "Invalid input",
            Some(errors.to_string()),
        );
        error.fields = errors
            .fields()
            .iter()
            .map(|field| FieldErrorBody {
                field: field.field.to_string(),
                message: field.message.clone(),
            })
            .collect();
        error
    }

    pub fn malformed_body(hint: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::MALFORMED_BODY,
            "Request body is not valid JSON",
            Some(hint.into()),
        )
    }

    pub fn not_found(hint: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            codes::NOT_FOUND,
            "Resource not found",
            Some(hint.into()),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => ApiError::invalid_input(&errors),
            err @ CatalogError::NotFound { .. } => ApiError::not_found(err.to_string()),
            CatalogError::Conflict(reason) => ApiError::new(
                StatusCode::CONFLICT,
                codes::NAME_MISMATCH,
                "Stored name does not match",
                Some(reason),
            ),
            err @ CatalogError::StoreUnavailable(_) => ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                codes::STORE_UNAVAILABLE,
                "Catalog store unavailable",
                Some(report_chain(&err)),
            ),
            err @ CatalogError::Misconfigured(_) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL,
                "Unexpected error occurred",
                Some(err.to_string()),
            ),
        }
    }
}

fn report_chain(err: &CatalogError) -> String {
    ErrorReport::from_error("infra::http::api", StatusCode::SERVICE_UNAVAILABLE, err)
        .messages
        .join(": ")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = format!(
            "{}: {}",
            self.code,
            self.hint.as_deref().unwrap_or(self.message)
        );
        // Store details stay in the log; clients only see the public message.
        let hint = match self.status {
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::INTERNAL_SERVER_ERROR => None,
            _ => self.hint,
        };
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint,
                fields: self.fields,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message("infra::http::api", self.status, detail).attach(&mut response);
        response
    }
}
