use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::{KvStore, StoreError};
use crate::error::ConfigError;

/// Redis 键值存储
#[derive(Clone)]
pub struct RedisStore {
    redis: Arc<RedisClient>,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, ConfigError> {
        let client = RedisClient::open(url).map_err(|e| ConfigError::StoreOpen(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    /// 启动时探测连接，失败只记录日志
    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }
}
