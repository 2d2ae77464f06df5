use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::keys::{CacheKey, UserId};
use crate::cache::operations::TokenCache;
use crate::error::TokenError;

use super::clock::{Clock, SystemClock};
use super::generator::generate_random_token;

/// 校验结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid,
    /// 令牌已过期，并已轮换为新令牌
    Expired,
    Mismatch,
}

impl Verification {
    pub fn is_valid(self) -> bool {
        matches!(self, Verification::Valid)
    }
}

/// 令牌服务：生成、存储、校验和过期。
///
/// 请求之间不保留任何状态，所有数据都在键值存储中。
#[derive(Clone)]
pub struct TokenService {
    cache: TokenCache,
    clock: Arc<dyn Clock>,
    fallback_token: Option<String>,
}

impl TokenService {
    pub fn new(cache: TokenCache) -> Self {
        Self {
            cache,
            clock: Arc::new(SystemClock),
            fallback_token: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// 开发模式：存储不可用时生成操作返回固定令牌
    pub fn with_fallback_token(mut self, token: impl Into<String>) -> Self {
        self.fallback_token = Some(token.into());
        self
    }

    /// 生成新令牌并覆盖旧令牌，旧令牌立即失效
    pub async fn generate(&self, user: &UserId) -> Result<String, TokenError> {
        match (self.rotate(user).await, &self.fallback_token) {
            (Err(TokenError::StoreUnavailable), Some(fallback)) => {
                warn!(
                    "Key-value store unavailable, returning development fallback token for user {}",
                    user
                );
                Ok(fallback.clone())
            }
            (result, _) => result,
        }
    }

    /// 校验令牌。过期时先轮换令牌再返回 `Expired`，不做比较。
    pub async fn verify(&self, user: &UserId, supplied: &str) -> Result<Verification, TokenError> {
        self.verify_with(user, Ok(supplied)).await
    }

    /// 同 `verify`，但提交的令牌只在未过期时才需要；
    /// 请求体解析失败的错误在过期判断之后才返回。
    pub async fn verify_with(
        &self,
        user: &UserId,
        supplied: Result<&str, TokenError>,
    ) -> Result<Verification, TokenError> {
        let now = self.clock.now();
        let expires_at = self.expires_at(user).await?;

        if now >= expires_at {
            debug!(
                "Token for user {} expired (now {}, expires at {})",
                user, now, expires_at
            );
            match self.rotate(user).await {
                Ok(_) => info!("Rotated expired token for user {}", user),
                Err(e @ TokenError::StoreTimeout { .. }) => return Err(e),
                Err(e) => warn!("Failed to rotate expired token for user {}: {}", user, e),
            }
            return Ok(Verification::Expired);
        }

        let supplied = supplied?;
        let stored = self.cache.read(&CacheKey::token(user)).await?;
        match stored {
            Some(token) if token == supplied => Ok(Verification::Valid),
            Some(_) => Ok(Verification::Mismatch),
            None => {
                debug!("No token stored for user {}", user);
                Ok(Verification::Mismatch)
            }
        }
    }

    /// 原样返回当前令牌，不检查过期
    pub async fn get(&self, user: &UserId) -> Result<String, TokenError> {
        self.cache
            .read(&CacheKey::token(user))
            .await?
            .ok_or_else(|| TokenError::NotFound {
                user: user.to_string(),
            })
    }

    /// 设置令牌有效期（秒）
    pub async fn set_expiry(&self, user: &UserId, seconds: u64) -> Result<(), TokenError> {
        if i64::try_from(seconds).is_err() {
            return Err(TokenError::Validation(format!(
                "expiry of {}s is out of range",
                seconds
            )));
        }
        self.cache
            .write_confirmed(&CacheKey::expire_time(user), &seconds.to_string())
            .await?;
        info!("Set token expiry for user {} to {}s", user, seconds);
        Ok(())
    }

    /// 过期时间点 = 生成时间 + 有效期，缺失值按 0 计算
    pub async fn expires_at(&self, user: &UserId) -> Result<i64, TokenError> {
        let generated_at = self.cache.read_i64(&CacheKey::generate_time(user)).await?;
        let offset = self.cache.read_i64(&CacheKey::expire_time(user)).await?;
        Ok(generated_at.saturating_add(offset))
    }

    async fn rotate(&self, user: &UserId) -> Result<String, TokenError> {
        let token = generate_random_token();
        let now = self.clock.now();

        self.cache
            .write_confirmed(&CacheKey::token(user), &token)
            .await?;
        self.cache
            .write_confirmed(&CacheKey::generate_time(user), &now.to_string())
            .await?;

        debug!("Generated new token for user {} at {}", user, now);
        Ok(token)
    }
}
