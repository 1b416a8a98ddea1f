//! 头像地址生成

use sha2::{Digest, Sha256};

/// 由邮箱推导确定性的头像 URL（裁剪空白、转小写后取 SHA-256）。
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm", hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_email() {
        assert_eq!(avatar_url("a@x.com"), avatar_url("a@x.com"));
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(avatar_url("  A@X.Com "), avatar_url("a@x.com"));
    }

    #[test]
    fn different_emails_differ() {
        assert_ne!(avatar_url("a@x.com"), avatar_url("b@x.com"));
    }

    #[test]
    fn url_shape() {
        let url = avatar_url("a@x.com");
        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=200&r=pg&d=mm"));
    }
}
