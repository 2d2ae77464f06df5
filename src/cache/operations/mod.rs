// 缓存操作
// 提供带超时和写入校验的存储操作

pub mod token;

pub use token::TokenCache;
