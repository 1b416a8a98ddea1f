//! 用户账户：注册、登录、token 签发与校验

mod auth;
mod crypto;
mod manager;
mod models;

pub use manager::UserManager;
pub use models::{AuthToken, LoginRequest, RegisterRequest, TokenClaims, User, UserSummary};
