use std::env;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_KV_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    /// 键值存储绑定，未配置时启动失败（除非显式开启开发回退）
    pub redis_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub kv_timeout_ms: u64,
    /// 写入后回读校验
    pub verify_writes: bool,
    /// 仅用于开发环境的回退令牌
    pub dev_fallback_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis_url: None,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            kv_timeout_ms: DEFAULT_KV_TIMEOUT_MS,
            verify_writes: true,
            dev_fallback_token: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let config = Config {
            redis_url: optional_var("REDIS_URL"),
            server_host: optional_var("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            kv_timeout_ms: parse_var("KV_TIMEOUT_MS", DEFAULT_KV_TIMEOUT_MS)?,
            verify_writes: parse_var("KV_VERIFY_WRITES", true)?,
            dev_fallback_token: optional_var("DEV_FALLBACK_TOKEN"),
        };
        config.validate()?;
        Ok(config)
    }

    /// 存储未绑定且未开启回退时立即失败
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.redis_url.is_none() && self.dev_fallback_token.is_none() {
            return Err(ConfigError::StoreNotBound);
        }
        if self.kv_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                name: "KV_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    pub fn kv_timeout(&self) -> Duration {
        Duration::from_millis(self.kv_timeout_ms)
    }

    pub fn fallback_mode(&self) -> bool {
        self.redis_url.is_none() && self.dev_fallback_token.is_some()
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_binding_is_rejected() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(ConfigError::StoreNotBound)));
    }

    #[test]
    fn fallback_flag_allows_unbound_store() {
        let config = Config {
            dev_fallback_token: Some("dev-token".into()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.fallback_mode());
    }

    #[test]
    fn bound_store_is_not_fallback_mode() {
        let config = Config {
            redis_url: Some("redis://127.0.0.1/".into()),
            dev_fallback_token: Some("dev-token".into()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
        assert!(!config.fallback_mode());
        assert_eq!(config.kv_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            redis_url: Some("redis://127.0.0.1/".into()),
            kv_timeout_ms: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "KV_TIMEOUT_MS", .. })
        ));
    }
}
