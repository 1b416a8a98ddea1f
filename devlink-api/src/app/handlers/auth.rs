//! 注册与登录 handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use devlink_core::validation::{FieldBag, LOGIN_RULES, REGISTER_RULES};
use devlink_core::{AuthToken, LoginRequest, RegisterRequest, UserSummary};

use super::super::error::ApiError;
use super::super::state::AppState;

/// POST /api/v1/auth/register - 注册新用户
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    let bag = FieldBag::new()
        .put("name", req.name.as_deref())
        .put("email", req.email.as_deref())
        .put("password", req.password.as_deref());
    let validation = REGISTER_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }

    let user = state
        .users
        .register(
            req.name.as_deref().unwrap_or_default().trim(),
            req.email.as_deref().unwrap_or_default().trim(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login - 验证凭据并签发 token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthToken>, ApiError> {
    let bag = FieldBag::new()
        .put("email", req.email.as_deref())
        .put("password", req.password.as_deref());
    let validation = LOGIN_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }

    let auth = state
        .users
        .login(
            req.email.as_deref().unwrap_or_default().trim(),
            req.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(auth))
}
