use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use devlink_core::StoreError;
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct ApiError {
    code: &'static str,
    message: String,
    status: StatusCode,
    /// 校验失败时的字段错误映射
    field_errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    pub fn new(code: &'static str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status,
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized", StatusCode::UNAUTHORIZED, "unauthorized")
    }

    pub fn validation(errors: BTreeMap<String, String>) -> Self {
        let mut err = Self::new("ValidationFailed", StatusCode::BAD_REQUEST, "invalid input");
        err.field_errors = Some(errors);
        err
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::new(
                "NotFound",
                StatusCode::NOT_FOUND,
                format!("{what} not found"),
            ),
            StoreError::AlreadyExists(what) => ApiError::new(
                "AlreadyExists",
                StatusCode::CONFLICT,
                format!("{what} already exists"),
            ),
            StoreError::AlreadyLiked(what) => ApiError::new(
                "AlreadyLiked",
                StatusCode::CONFLICT,
                format!("{what} already liked"),
            ),
            StoreError::NotLiked(what) => ApiError::new(
                "NotLiked",
                StatusCode::CONFLICT,
                format!("{what} not yet liked"),
            ),
            StoreError::Unauthorized(msg) => {
                ApiError::new("Unauthorized", StatusCode::UNAUTHORIZED, msg)
            }
            StoreError::Forbidden(msg) => ApiError::new("Forbidden", StatusCode::FORBIDDEN, msg),
            StoreError::InvalidId => {
                ApiError::new("InvalidId", StatusCode::BAD_REQUEST, "invalid id")
            }
            StoreError::Io(e) => {
                tracing::error!(error = %e, "datastore io error");
                ApiError::new(
                    "InternalError",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error",
                )
            }
            StoreError::Serde(e) => {
                tracing::error!(error = %e, "datastore serde error");
                ApiError::new(
                    "InternalError",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error",
                )
            }
            StoreError::Other(msg) => {
                tracing::error!(error = %msg, "unexpected error");
                ApiError::new(
                    "InternalError",
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(errors) = self.field_errors {
            body["errors"] = json!(errors);
        }
        (self.status, Json(body)).into_response()
    }
}
