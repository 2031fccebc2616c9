//! Wire types shared by the carapp admin API and its clients.

use serde::{Deserialize, Serialize};

/// One catalog row as returned by list and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntryResponse {
    pub id: i32,
    pub name: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogNameRequest {
    #[serde(default)]
    pub name: String,
}

/// Optional body of a delete request; a present name must match the stored row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDeleteRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Returned after a successful create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorBody>,
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorBody {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_request_defaults_missing_name_to_empty() {
        let request: CatalogNameRequest = serde_json::from_str("{}").expect("parse");
        assert!(request.name.is_empty());
    }

    #[test]
    fn error_body_omits_empty_optional_parts() {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: "not_found".into(),
                message: "catalog entry not found".into(),
                hint: None,
                fields: Vec::new(),
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "error": { "code": "not_found", "message": "catalog entry not found" }
            })
        );
    }
}
