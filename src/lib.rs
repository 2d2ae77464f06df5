use std::sync::Arc;

use axum::{Router, routing::post};
use config::Config;
use error::ConfigError;

use cache::{FallbackStore, KvStore, RedisStore, TokenCache};
use token::TokenService;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod token;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: Config, tokens: TokenService) -> Self {
        Self { config, tokens }
    }

    /// 按配置绑定键值存储。未绑定存储时只有显式开启回退才允许启动。
    pub async fn from_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let (store, fallback): (Arc<dyn KvStore>, Option<String>) =
            match (&config.redis_url, &config.dev_fallback_token) {
                (Some(url), _) => {
                    let store = RedisStore::open(url)?;
                    // 连接失败只告警，具体请求仍会返回存储错误
                    if let Err(e) = store.ping().await {
                        tracing::warn!("Key-value store not reachable at startup: {}", e);
                    }
                    (Arc::new(store) as Arc<dyn KvStore>, None)
                }
                (None, Some(token)) => {
                    tracing::warn!(
                        "REDIS_URL not set, running with development fallback token; do not use in production"
                    );
                    (
                        Arc::new(FallbackStore::new(token.clone())) as Arc<dyn KvStore>,
                        Some(token.clone()),
                    )
                }
                (None, None) => return Err(ConfigError::StoreNotBound),
            };

        if !config.verify_writes {
            tracing::info!("Write read-back verification disabled");
        }

        let cache =
            TokenCache::new(store, config.kv_timeout()).with_verify_writes(config.verify_writes);
        let tokens = match fallback {
            Some(token) => TokenService::new(cache).with_fallback_token(token),
            None => TokenService::new(cache),
        };

        Ok(Self::new(config, tokens))
    }
}

/// 令牌路由
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/token/{user}/generate", post(routes::token::generate_token))
        .route("/token/{user}/verify", post(routes::token::verify_token))
        .route("/token/{user}/get", post(routes::token::get_token))
        .route("/token/{user}/expiry", post(routes::token::set_expiry))
}

/// 创建主路由并挂载日志中间件
pub fn create_router(state: AppState) -> Router {
    token_routes()
        .layer(axum::middleware::from_fn(middleware::log_errors))
        .with_state(state)
}
