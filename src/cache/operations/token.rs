use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error, warn};

use crate::cache::keys::CacheKey;
use crate::cache::store::{KvStore, StoreError};
use crate::error::TokenError;

/// 令牌缓存操作：为每次存储调用加上超时，并在写入后回读校验
#[derive(Clone)]
pub struct TokenCache {
    store: Arc<dyn KvStore>,
    timeout: Duration,
    verify_writes: bool,
}

impl TokenCache {
    pub fn new(store: Arc<dyn KvStore>, timeout: Duration) -> Self {
        Self {
            store,
            timeout,
            verify_writes: true,
        }
    }

    /// 关闭回读校验，仅适用于强一致的存储
    pub fn with_verify_writes(mut self, verify_writes: bool) -> Self {
        self.verify_writes = verify_writes;
        self
    }

    /// 读取键值。
    ///
    /// 超时会作为错误返回；其它存储错误降级为 `None`。
    pub async fn read(&self, key: &CacheKey) -> Result<Option<String>, TokenError> {
        let key = Self::checked_key(key)?;

        match timeout(self.timeout, self.store.get(key)).await {
            Err(_) => {
                error!("Key-value read timed out for key \"{}\"", key);
                Err(TokenError::StoreTimeout {
                    key: key.to_string(),
                })
            }
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Error reading key \"{}\", treating as absent: {}", key, e);
                Ok(None)
            }
        }
    }

    /// 写入键值，返回写入是否得到确认。
    ///
    /// 超时和存储不可用会作为错误返回；后端拒绝写入或回读不一致返回 `false`。
    pub async fn write(&self, key: &CacheKey, value: &str) -> Result<bool, TokenError> {
        let key = Self::checked_key(key)?;
        if value.is_empty() {
            return Err(TokenError::Validation(format!(
                "value for key \"{}\" must not be empty",
                key
            )));
        }

        match timeout(self.timeout, self.store.put(key, value)).await {
            Err(_) => {
                error!("Key-value write timed out for key \"{}\"", key);
                return Err(TokenError::StoreTimeout {
                    key: key.to_string(),
                });
            }
            Ok(Err(StoreError::Unavailable(reason))) => {
                error!("Key-value store unavailable writing \"{}\": {}", key, reason);
                return Err(TokenError::StoreUnavailable);
            }
            Ok(Err(e)) => {
                error!("Error writing key \"{}\": {}", key, e);
                return Ok(false);
            }
            Ok(Ok(())) => {}
        }

        if !self.verify_writes {
            return Ok(true);
        }

        let stored = self.read_raw(key).await?;
        if stored.as_deref() == Some(value) {
            debug!("Wrote and verified key \"{}\"", key);
            Ok(true)
        } else {
            warn!(
                "Write verification failed for key \"{}\": read back {:?}",
                key, stored
            );
            Ok(false)
        }
    }

    /// 写入并要求确认，否则返回 `StoreWriteFailure`
    pub async fn write_confirmed(&self, key: &CacheKey, value: &str) -> Result<(), TokenError> {
        if self.write(key, value).await? {
            Ok(())
        } else {
            Err(TokenError::StoreWriteFailure {
                key: key.to_string(),
            })
        }
    }

    /// 读取整数值，缺失按 0 处理，无法解析视为数据不一致
    pub async fn read_i64(&self, key: &CacheKey) -> Result<i64, TokenError> {
        match self.read(key).await? {
            None => Ok(0),
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| {
                    warn!("Non-integer value stored at key \"{}\" ({} bytes)", key, raw.len());
                    TokenError::StoreReadFailure {
                        key: key.to_string(),
                        value: value_preview(&raw),
                    }
                }),
        }
    }

    async fn read_raw(&self, key: &str) -> Result<Option<String>, TokenError> {
        match timeout(self.timeout, self.store.get(key)).await {
            Err(_) => {
                error!("Key-value read-back timed out for key \"{}\"", key);
                Err(TokenError::StoreTimeout {
                    key: key.to_string(),
                })
            }
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Error reading back key \"{}\": {}", key, e);
                Ok(None)
            }
        }
    }

    fn checked_key(key: &CacheKey) -> Result<&str, TokenError> {
        let key = key.as_str();
        if key.is_empty() {
            return Err(TokenError::Validation("key must not be empty".into()));
        }
        Ok(key)
    }
}

/// 错误信息中保留的存储值最大字符数
const MAX_VALUE_PREVIEW: usize = 32;

fn value_preview(raw: &str) -> String {
    if raw.chars().count() <= MAX_VALUE_PREVIEW {
        raw.to_string()
    } else {
        let head: String = raw.chars().take(MAX_VALUE_PREVIEW).collect();
        format!("{}...", head)
    }
}
