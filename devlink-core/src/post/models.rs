//! 帖子数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// 点赞记录（user 为点赞用户 id，应用层保证每用户至多一条）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub user: String,
}

/// 评论（内嵌于帖子，自带 id 以便删除）
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// 评论作者 id
    pub user: String,
    pub name: String,
    pub avatar: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// 帖子（存储模型，冗余作者展示字段）
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    /// 作者 id，所有权检查依据
    pub user: String,
    pub name: String,
    pub avatar: String,
    pub text: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: Option<DateTime<Utc>>,
}

/// 发帖与评论请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub text: Option<String>,
}

/// 写操作的作者信息（取自认证 claims）
#[derive(Debug, Clone)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub avatar: String,
}
