use axum::http::{StatusCode, Uri};
use axum::Json;
use serde_json::json;

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// 处理 404，记录未知路径
pub async fn handler_404(uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    tracing::warn!(path = %uri.path(), "request for unknown route");

    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": "NotFound",
            "message": "no such route"
        })),
    )
}
