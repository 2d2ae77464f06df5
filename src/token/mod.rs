// 令牌生命周期：生成 -> 存储 -> 校验 -> 过期

pub mod clock;
pub mod generator;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use generator::generate_random_token;
pub use service::{TokenService, Verification};
