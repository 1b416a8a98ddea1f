//! 用户管理器：账户 CRUD 与唯一邮箱索引

use super::crypto::hash_password;
use super::models::*;
use crate::avatar::avatar_url;
use crate::error::{Result, StoreError};
use crate::store::{Collection, Index};
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument};

const DEFAULT_JWT_ISSUER: &str = "devlink-api";
const DEFAULT_JWT_AUDIENCE: &str = "devlink-clients";
/// Access token 默认有效期（秒）
const DEFAULT_TOKEN_TTL: i64 = 3600;

/// 用户管理器
#[derive(Debug, Clone)]
pub struct UserManager {
    /// 用户文档集合
    pub(super) users: Collection,
    /// 邮箱 -> 用户 id 索引
    pub(super) emails: Index,
    /// JWT 签名密钥（显式注入，无全局状态）
    pub(super) jwt_secret: String,
    pub(super) jwt_issuer: String,
    pub(super) jwt_audience: String,
    /// Token 有效期（秒）
    pub(super) token_ttl: i64,
}

impl UserManager {
    pub fn new<P: AsRef<Path>>(data_dir: P, jwt_secret: String) -> Self {
        let users = Collection::new(data_dir, "users");
        let emails = Index::new(&users, "email");
        Self {
            users,
            emails,
            jwt_secret,
            jwt_issuer: DEFAULT_JWT_ISSUER.to_string(),
            jwt_audience: DEFAULT_JWT_AUDIENCE.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    /// 配置 JWT iss/aud
    pub fn with_claims_context(
        mut self,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.jwt_issuer = issuer.into();
        self.jwt_audience = audience.into();
        self
    }

    /// 配置 token 有效期
    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub async fn ensure_dirs(&self) -> Result<()> {
        self.users.ensure_dir().await
    }
}

impl UserManager {
    /// 注册新用户；邮箱已占用返回 AlreadyExists。
    /// 入参应已通过校验层（非空、格式合法）。
    #[instrument(skip(self, password))]
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        self.ensure_dirs().await?;

        if self.find_by_email(email).await?.is_some() {
            return Err(StoreError::AlreadyExists(format!("email: {}", email)));
        }

        let password_hash = hash_password(password).await?;

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: avatar_url(email),
            password_hash,
            created_at: Some(now),
            updated_at: Some(now),
        };

        self.users.write(&user.id, &user).await?;
        self.emails.insert(&user.email, &user.id).await?;

        info!(user_id = %user.id, email = %user.email, "registered user");
        Ok(user)
    }

    /// 获取用户
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.users
            .read(id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound(_) => StoreError::NotFound(format!("user: {}", id)),
                other => other,
            })
    }

    /// 通过邮箱查找（优先索引，索引失效时回退全量扫描并修复）。
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.ensure_dirs().await?;

        if let Some(id) = self.emails.get(email).await {
            match self.get_user(&id).await {
                Ok(user) => return Ok(Some(user)),
                Err(StoreError::NotFound(_)) => {
                    // 索引指向的用户已不存在，清理过期条目
                    self.emails.remove_key(email).await?;
                }
                Err(e) => return Err(e),
            }
        }

        let users: Vec<User> = self.users.list().await?;
        for user in users {
            if user.email == email {
                self.emails.insert(email, &user.id).await?;
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    /// 删除用户及其邮箱索引条目
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.users.remove(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => StoreError::NotFound(format!("user: {}", id)),
            other => other,
        })?;
        self.emails.remove_id(id).await?;
        info!(user_id = %id, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> UserManager {
        UserManager::new(dir.path(), "test-secret".into())
    }

    #[tokio::test]
    async fn register_hashes_password_and_derives_avatar() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);

        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();
        assert_ne!(user.password_hash, "secret1");
        assert!(user.password_hash.starts_with("$2"));
        assert!(user.avatar.starts_with("https://www.gravatar.com/avatar/"));
    }

    #[tokio::test]
    async fn duplicate_email_rejected() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);

        users.register("Ada", "ada@x.com", "secret1").await.unwrap();
        let err = users
            .register("Eve", "ada@x.com", "other-secret")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn find_by_email_heals_stale_index() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);

        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();
        // 直接写入指向不存在用户的索引条目
        users.emails.insert("ada@x.com", "gone").await.unwrap();

        let found = users.find_by_email("ada@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(users.emails.get("ada@x.com").await, Some(user.id));
    }

    #[tokio::test]
    async fn delete_clears_email_index() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);

        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();
        users.delete_user(&user.id).await.unwrap();

        assert!(users.find_by_email("ada@x.com").await.unwrap().is_none());
        let err = users.get_user(&user.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
