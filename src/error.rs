use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 启动阶段的配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("key-value store is not bound: set REDIS_URL (or DEV_FALLBACK_TOKEN for development)")]
    StoreNotBound,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("failed to open key-value store: {0}")]
    StoreOpen(String),
}

/// 令牌生命周期中的错误
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("key-value operation timed out for key \"{key}\"")]
    StoreTimeout { key: String },
    #[error("key-value store is unavailable")]
    StoreUnavailable,
    #[error("write to key \"{key}\" could not be confirmed")]
    StoreWriteFailure { key: String },
    #[error("inconsistent value \"{value}\" stored at key \"{key}\"")]
    StoreReadFailure { key: String, value: String },
    #[error("no token stored for user \"{user}\"")]
    NotFound { user: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Token(#[from] TokenError),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Token(err) = self;
        let status = match &err {
            TokenError::Validation(_) => StatusCode::BAD_REQUEST,
            TokenError::StoreTimeout { .. }
            | TokenError::StoreUnavailable
            | TokenError::StoreWriteFailure { .. }
            | TokenError::StoreReadFailure { .. }
            | TokenError::NotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            code: status.as_u16() as i32,
            error_message: err.to_string(),
        });

        (status, body).into_response()
    }
}
