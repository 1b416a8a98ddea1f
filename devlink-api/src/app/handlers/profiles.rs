//! 档案 handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use devlink_core::validation::{FieldBag, EDUCATION_RULES, EXPERIENCE_RULES, PROFILE_RULES};
use devlink_core::{
    EducationInput, ExperienceInput, Profile, ProfileInput, ProfileView, StoreError,
};
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};

use super::super::error::ApiError;
use super::super::middleware::Identity;
use super::super::state::AppState;

/// POST /api/v1/profiles 的请求体（档案字段包在 `profile` 键下）
#[derive(Debug, Default, Deserialize)]
pub struct CreateProfileBody {
    #[serde(default)]
    pub profile: ProfileInput,
}

/// 把档案与主人的公开信息拼成读取视图。
async fn into_view(state: &AppState, profile: Profile) -> Result<ProfileView, ApiError> {
    let owner = state.users.get_user(&profile.user_id).await?;
    Ok(ProfileView::new(profile, &owner))
}

/// GET /api/v1/profiles - 列出全部档案
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let profiles = state.profiles.list().await?;

    // 并发拼接主人信息；主人已被删除的档案跳过
    let views: Vec<ProfileView> = join_all(
        profiles
            .into_iter()
            .map(|profile| into_view(&state, profile)),
    )
    .await
    .into_iter()
    .flatten()
    .collect();

    Ok(Json(json!({ "profiles": views })))
}

/// GET /api/v1/profiles/me - 当前用户的档案
pub async fn get_my_profile(
    State(state): State<AppState>,
    Identity(auth): Identity,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.get_by_user(&auth.claims.sub).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// GET /api/v1/profiles/handle/:handle - 按唯一 handle 查询
pub async fn get_profile_by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.get_by_handle(&handle).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// GET /api/v1/profiles/:id - 按档案 id 查询
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.get(&id).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// POST /api/v1/profiles - 建档（每用户一份）
pub async fn create_profile(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Json(body): Json<CreateProfileBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = body.profile;
    let bag = FieldBag::new()
        .put("handle", input.handle.as_deref())
        .put("skills", input.skills.as_deref());
    let validation = PROFILE_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }

    let profile = state.profiles.create(&auth.claims.sub, input).await?;
    let view = into_view(&state, profile).await?;
    Ok((StatusCode::CREATED, Json(json!({ "profile": view }))))
}

/// POST /api/v1/profiles/experience - 追加职业经历
pub async fn add_experience(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Json(input): Json<ExperienceInput>,
) -> Result<Json<Value>, ApiError> {
    let bag = FieldBag::new()
        .put("title", input.title.as_deref())
        .put("company", input.company.as_deref())
        .put("from", input.from.as_deref());
    let validation = EXPERIENCE_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }

    let profile = state.profiles.add_experience(&auth.claims.sub, input).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// DELETE /api/v1/profiles/experience/:id - 删除职业经历条目
pub async fn remove_experience(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.remove_experience(&auth.claims.sub, &id).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// POST /api/v1/profiles/education - 追加教育经历
pub async fn add_education(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Json(input): Json<EducationInput>,
) -> Result<Json<Value>, ApiError> {
    let bag = FieldBag::new()
        .put("school", input.school.as_deref())
        .put("degree", input.degree.as_deref())
        .put("field_of_study", input.field_of_study.as_deref())
        .put("from", input.from.as_deref());
    let validation = EDUCATION_RULES.validate(&bag);
    if !validation.is_valid() {
        return Err(ApiError::validation(validation.errors));
    }

    let profile = state.profiles.add_education(&auth.claims.sub, input).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// DELETE /api/v1/profiles/education/:id - 删除教育经历条目
pub async fn remove_education(
    State(state): State<AppState>,
    Identity(auth): Identity,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.profiles.remove_education(&auth.claims.sub, &id).await?;
    let view = into_view(&state, profile).await?;
    Ok(Json(json!({ "profile": view })))
}

/// DELETE /api/v1/profiles - 删除档案及其所属用户
pub async fn delete_profile(
    State(state): State<AppState>,
    Identity(auth): Identity,
) -> Result<Json<Value>, ApiError> {
    match state.profiles.delete_by_user(&auth.claims.sub).await {
        Ok(_) => {}
        // 无档案时仍删除账户本身
        Err(StoreError::NotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    state.users.delete_user(&auth.claims.sub).await?;
    Ok(Json(json!({})))
}
