use std::fmt;

use crate::error::TokenError;

/// 键分隔符，用户ID中不允许出现
pub const KEY_DELIMITER: char = '-';

/// 用户ID最大长度（字节）
pub const MAX_USER_ID_LEN: usize = 128;

/// 当前令牌键前缀
const TOKEN_PREFIX: &str = "token";

/// 令牌生成时间键前缀
const GENERATE_TIME_PREFIX: &str = "generate-time";

/// 令牌有效期键前缀
const EXPIRE_TIME_PREFIX: &str = "expire-time";

/// 经过校验的用户ID，可以安全地作为存储键的一段
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, TokenError> {
        if raw.is_empty() {
            return Err(TokenError::Validation("user id must not be empty".into()));
        }
        if raw.len() > MAX_USER_ID_LEN {
            return Err(TokenError::Validation(format!(
                "user id exceeds {} bytes",
                MAX_USER_ID_LEN
            )));
        }
        if raw.contains(KEY_DELIMITER) {
            return Err(TokenError::Validation(format!(
                "user id must not contain '{}'",
                KEY_DELIMITER
            )));
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TokenError::Validation(
                "user id must not contain whitespace or control characters".into(),
            ));
        }
        Ok(UserId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 存储键，只能通过下面的构造函数生成
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `token-{user}`
    pub fn token(user: &UserId) -> Self {
        Self::build(TOKEN_PREFIX, user)
    }

    /// `generate-time-{user}`
    pub fn generate_time(user: &UserId) -> Self {
        Self::build(GENERATE_TIME_PREFIX, user)
    }

    /// `expire-time-{user}`
    pub fn expire_time(user: &UserId) -> Self {
        Self::build(EXPIRE_TIME_PREFIX, user)
    }

    fn build(prefix: &str, user: &UserId) -> Self {
        CacheKey(format!("{}{}{}", prefix, KEY_DELIMITER, user.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否为当前令牌键
    pub fn is_token_key(key: &str) -> bool {
        key.strip_prefix(TOKEN_PREFIX)
            .and_then(|rest| rest.strip_prefix(KEY_DELIMITER))
            .is_some_and(|user| !user.is_empty())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_stored_shapes() {
        let alice = UserId::parse("alice").unwrap();
        assert_eq!(CacheKey::token(&alice).as_str(), "token-alice");
        assert_eq!(CacheKey::generate_time(&alice).as_str(), "generate-time-alice");
        assert_eq!(CacheKey::expire_time(&alice).as_str(), "expire-time-alice");
    }

    #[test]
    fn rejects_delimiter_in_user_id() {
        let err = UserId::parse("time-alice").unwrap_err();
        assert!(matches!(err, TokenError::Validation(_)));
    }

    #[test]
    fn rejects_empty_and_oversized_ids() {
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse(&"a".repeat(MAX_USER_ID_LEN)).is_ok());
        assert!(UserId::parse(&"a".repeat(MAX_USER_ID_LEN + 1)).is_err());
    }

    #[test]
    fn rejects_whitespace_and_control_chars() {
        assert!(UserId::parse("al ice").is_err());
        assert!(UserId::parse("alice\n").is_err());
        assert!(UserId::parse("alice_01.example").is_ok());
    }

    #[test]
    fn recognises_token_keys() {
        assert!(CacheKey::is_token_key("token-bob"));
        assert!(!CacheKey::is_token_key("token-"));
        assert!(!CacheKey::is_token_key("generate-time-bob"));
        assert!(!CacheKey::is_token_key("tokens-bob"));
    }
}
