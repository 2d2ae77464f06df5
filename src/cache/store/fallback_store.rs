use async_trait::async_trait;

use super::{KvStore, StoreError};
use crate::cache::keys::CacheKey;

/// 开发环境回退存储：未绑定键值存储且显式开启回退时使用。
/// 令牌读取返回固定令牌，其它读取为空，写入一律不可用。
#[derive(Clone)]
pub struct FallbackStore {
    token: String,
}

impl FallbackStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl KvStore for FallbackStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if CacheKey::is_token_key(key) {
            tracing::warn!("Key-value store not bound, answering \"{}\" with fallback token", key);
            Ok(Some(self.token.clone()))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(format!(
            "no key-value store bound, cannot write \"{}\"",
            key
        )))
    }
}
