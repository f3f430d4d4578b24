//! Handler errors and their JSON rendering.

use axum::{
    extract::rejection::JsonRejection,
    http::{header::ALLOW, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use optical_core::CoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with. Every variant renders as
/// `{"error": "<message>"}` with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Authorization token required")]
    Unauthorized,

    #[error("Invalid token")]
    Forbidden,

    #[error("Method {method} Not Allowed")]
    MethodNotAllowed { method: Method, allow: &'static str },

    #[error("{0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn route_not_found() -> Self {
        ApiError::NotFound("Route not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(message) => ApiError::BadRequest(message),
            CoreError::NotFound(label) => ApiError::NotFound(format!("{label} not found")),
            CoreError::Storage(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let mut response = (status, Json(json!({ "error": self.to_string() }))).into_response();
        if let ApiError::MethodNotAllowed { allow, .. } = self {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optical_core::RepoError;

    #[test]
    fn test_core_errors_map_to_statuses() {
        let e: ApiError = CoreError::Validation("name is required".into()).into();
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "name is required");

        let e: ApiError = CoreError::NotFound("Customer").into();
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "Customer not found");

        let e: ApiError = CoreError::Storage(RepoError::Poisoned("lock".into())).into();
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = ApiError::MethodNotAllowed {
            method: Method::PATCH,
            allow: "GET, POST",
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, POST");
    }
}
