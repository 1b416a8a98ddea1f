use axum::http::{header, HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::handlers::{
    add_comment, add_education, add_experience, create_post, create_profile, delete_post,
    delete_profile, get_comment, get_me, get_my_profile, get_post, get_profile,
    get_profile_by_handle, handler_404, health, like_post, list_comments, list_posts,
    list_profiles, login, register, remove_comment, remove_education, remove_experience,
    unlike_post,
};
use super::middleware::auth_middleware;
use super::state::AppState;

/// 根据配置的来源列表构建 CorsLayer
fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .allow_credentials(true);

    if cors_origins.is_empty() {
        tracing::warn!(
            "DL_CORS_ORIGINS not configured, allowing all origins. \
             Set DL_CORS_ORIGINS in production for security."
        );
        // any() 不能与 credentials(true) 共用
        base.allow_origin(AllowOrigin::any()).allow_credentials(false)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .into_iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        base.allow_origin(origins)
    }
}

/// Build the router with routes and middleware wired.
pub fn app_router(state: AppState, cors_origins: Vec<String>) -> Router {
    // 认证端点（公开）
    let auth_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    // 当前用户
    let user_routes = Router::new().route("/users/me", get(get_me));

    // 档案端点；读取公开，写入由 handler 中的 Identity extractor 把关
    let profile_routes = Router::new()
        .route(
            "/profiles",
            get(list_profiles).post(create_profile).delete(delete_profile),
        )
        .route("/profiles/me", get(get_my_profile))
        .route("/profiles/handle/:handle", get(get_profile_by_handle))
        .route("/profiles/experience", post(add_experience))
        .route("/profiles/experience/:id", delete(remove_experience))
        .route("/profiles/education", post(add_education))
        .route("/profiles/education/:id", delete(remove_education))
        .route("/profiles/:id", get(get_profile));

    // 帖子端点
    let post_routes = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post).delete(delete_post))
        .route("/posts/:id/like", put(like_post))
        .route("/posts/:id/unlike", put(unlike_post))
        .route("/posts/:id/comments", get(list_comments).post(add_comment))
        .route(
            "/posts/:id/comments/:cid",
            get(get_comment).delete(remove_comment),
        );

    let api_v1 = Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .merge(profile_routes)
        .merge(post_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1)
        .fallback(handler_404)
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(build_cors_layer(cors_origins))
        .with_state(state)
}
