//! 当前用户 handlers

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use super::super::error::ApiError;
use super::super::middleware::Identity;
use super::super::state::AppState;

/// GET /api/v1/users/me - 当前登录用户
pub async fn get_me(
    State(state): State<AppState>,
    Identity(auth): Identity,
) -> Result<Json<Value>, ApiError> {
    let user = state.users.get_user(&auth.claims.sub).await?;
    Ok(Json(json!({
        "user": {
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "avatar": user.avatar,
        }
    })))
}
