// 缓存模块
// 包含存储键、存储后端和缓存操作

pub mod keys;
pub mod operations;
pub mod store;

// 重新导出常用类型，方便其他模块使用
pub use keys::{CacheKey, UserId};
pub use operations::TokenCache;
pub use store::{FallbackStore, KvStore, MemoryStore, RedisStore, StoreError};
