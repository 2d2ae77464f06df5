// 键值存储抽象
// 令牌服务只依赖 get/put 两个操作

pub mod fallback_store;
pub mod memory_store;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

pub use fallback_store::FallbackStore;
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

/// 存储后端返回的错误，超时由上层的操作层负责
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// 读取键值，不存在时返回 `None`
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// 覆盖写入键值
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
