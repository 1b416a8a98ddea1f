//! JWT 认证：登录、签发与验证 token

use super::crypto::verify_password;
use super::models::*;
use super::UserManager;
use crate::error::{Result, StoreError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{info, instrument, warn};

impl UserManager {
    /// 用户登录。邮箱未注册与密码错误返回同样的错误，避免枚举账户。
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| StoreError::Unauthorized("invalid credentials".into()))?;

        let valid = verify_password(password, &user.password_hash).await?;
        if !valid {
            warn!(email = %email, "login failed: invalid password");
            return Err(StoreError::Unauthorized("invalid credentials".into()));
        }

        info!(user_id = %user.id, "user logged in");
        let token = self.issue_token(&user)?;
        Ok(AuthToken {
            success: true,
            token,
        })
    }

    /// 为用户签发 access token，claims 携带 id/name/avatar。
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_ttl);

        let claims = TokenClaims {
            sub: user.id.clone(),
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            iss: Some(self.jwt_issuer.clone()),
            aud: Some(self.jwt_audience.clone()),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| StoreError::Other(e.to_string()))
    }

    /// 验证 JWT token：签名、有效期、iss/aud。
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_audience(&[self.jwt_audience.clone()]);
        validation.set_issuer(&[self.jwt_issuer.clone()]);
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| StoreError::Unauthorized(format!("invalid token: {}", e)))?;

        Ok(token_data.claims)
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
    async fn login_returns_token_with_identity_claims() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);
        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();

        let auth = users.login("ada@x.com", "secret1").await.unwrap();
        assert!(auth.success);

        let claims = users.verify_token(&auth.token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "Ada");
        assert_eq!(claims.avatar, user.avatar);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);
        users.register("Ada", "ada@x.com", "secret1").await.unwrap();

        let err = users.login("ada@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unknown_email_rejected_without_detail() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);

        let err = users.login("ghost@x.com", "secret1").await.unwrap_err();
        match err {
            StoreError::Unauthorized(msg) => assert_eq!(msg, "invalid credentials"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn token_from_other_secret_rejected() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir);
        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();

        let other = UserManager::new(dir.path(), "other-secret".into());
        let token = other.issue_token(&user).unwrap();

        let err = users.verify_token(&token).unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn expired_token_rejected() {
        let dir = TempDir::new().unwrap();
        let users = manager(&dir).with_ttl(-120);
        let user = users.register("Ada", "ada@x.com", "secret1").await.unwrap();

        let token = users.issue_token(&user).unwrap();
        let err = users.verify_token(&token).unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized(_)));
    }
}
