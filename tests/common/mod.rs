#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use token_store::{
    AppState,
    cache::{KvStore, MemoryStore, StoreError, TokenCache},
    config::Config,
    create_router,
    token::{ManualClock, TokenService},
};

pub const START: i64 = 1_700_000_000;

/// 写入被静默丢弃的存储，回读永远读不到新值
#[derive(Clone, Default)]
pub struct DroppingStore {
    inner: MemoryStore,
}

#[async_trait]
impl KvStore for DroppingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// 读取永不返回的存储
#[derive(Clone, Default)]
pub struct HangingReadStore {
    inner: MemoryStore,
}

#[async_trait]
impl KvStore for HangingReadStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        std::future::pending::<()>().await;
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.put(key, value).await
    }
}

/// 读取正常、写入永不返回的存储
#[derive(Clone, Default)]
pub struct HangingWriteStore {
    inner: MemoryStore,
}

impl HangingWriteStore {
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl KvStore for HangingWriteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key).await
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

pub struct Harness {
    pub store: MemoryStore,
    pub clock: Arc<ManualClock>,
    pub service: TokenService,
}

impl Harness {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let clock = Arc::new(ManualClock::new(START));
        let service = service_over(Arc::new(store.clone()), clock.clone());
        Self {
            store,
            clock,
            service,
        }
    }

    pub fn router(&self) -> Router {
        app_over(self.service.clone())
    }
}

pub fn service_over(store: Arc<dyn KvStore>, clock: Arc<ManualClock>) -> TokenService {
    TokenService::new(TokenCache::new(store, Duration::from_secs(5))).with_clock(clock)
}

pub fn app_over(service: TokenService) -> Router {
    let config = Config {
        redis_url: Some("redis://127.0.0.1/".to_string()),
        ..Config::default()
    };
    create_router(AppState::new(config, service))
}

pub async fn post(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::post(uri).body(Body::empty()).unwrap(),
    };
    send(app, request).await
}

/// 发送原始 JSON 文本（可以是非法 JSON）
pub async fn post_raw(app: &Router, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
