// 缓存键模块
// 提供令牌相关的存储键生成函数

pub mod token_keys;

pub use token_keys::{CacheKey, KEY_DELIMITER, MAX_USER_ID_LEN, UserId};
