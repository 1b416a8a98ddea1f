//! 档案数据模型

use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// 职业经历条目（内嵌于档案，自带 id 以便删除）
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    /// 起始日期（表单级字符串，仅要求非空）
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// 教育经历条目
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// 档案（存储模型）
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// 档案主人（每个用户至多一份档案）
    pub user_id: String,
    /// 唯一的展示用标识
    pub handle: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 建档请求负载
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub handle: Option<String>,
    /// 逗号分隔的技能列表
    #[serde(default)]
    pub skills: Option<String>,
}

/// 职业经历请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 教育经历请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationInput {
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub current: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

/// 档案主人的冗余展示字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOwner {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

/// 读取视图：档案加上主人的公开信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: ProfileOwner,
}

impl ProfileView {
    pub fn new(profile: Profile, owner: &User) -> Self {
        Self {
            profile,
            user: ProfileOwner {
                id: owner.id.clone(),
                name: owner.name.clone(),
                avatar: owner.avatar.clone(),
            },
        }
    }
}
