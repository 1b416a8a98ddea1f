use std::future::Future;
use std::pin::Pin;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use devlink_core::{Author, TokenClaims};

use super::error::ApiError;
use super::state::AppState;

/// 认证信息扩展
#[derive(Debug, Clone)]
pub struct AuthInfo {
    pub claims: TokenClaims,
}

impl AuthInfo {
    /// 写操作使用的作者信息（id/name/avatar 来自 claims）
    pub fn author(&self) -> Author {
        Author {
            id: self.claims.sub.clone(),
            name: self.claims.name.clone(),
            avatar: self.claims.avatar.clone(),
        }
    }
}

/// 要求已登录身份的 Extractor；无有效 token 时以 401 拒绝。
#[derive(Debug, Clone)]
pub struct Identity(pub AuthInfo);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    fn from_request_parts<'a, 'b, 'c>(
        parts: &'a mut Parts,
        _state: &'b S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'c>>
    where
        'a: 'c,
        'b: 'c,
    {
        Box::pin(async move {
            let auth = parts
                .extensions
                .get::<AuthInfo>()
                .cloned()
                .ok_or_else(ApiError::unauthorized)?;
            Ok(Identity(auth))
        })
    }
}

/// 从 Authorization header 提取 Bearer token
fn extract_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// 验证请求携带的 token；有效则把身份挂到扩展里。公开路由不读取
/// 身份，带无效 token 的公开请求照常放行。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_token(&request) {
        match state.users.verify_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthInfo { claims });
            }
            Err(e) => {
                tracing::debug!(error = %e, path = %request.uri().path(), "ignoring invalid bearer token");
            }
        }
    }
    next.run(request).await
}
