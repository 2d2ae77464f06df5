use axum::{
    extract::{Json, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    cache::UserId,
    error::{AppError, TokenError},
};

use super::model::{ExpiryRequest, ExpiryResponse, TokenResponse, VerifyRequest, VerifyResponse};

#[axum::debug_handler]
pub async fn generate_token(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = UserId::parse(&user)?;
    let token = state.tokens.generate(&user).await?;
    Ok(Json(TokenResponse { token }))
}

#[axum::debug_handler]
pub async fn verify_token(
    State(state): State<AppState>,
    Path(user): Path<String>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserId::parse(&user)?;
    // 请求体只在令牌未过期时才需要，过期时照常轮换
    let supplied = match &payload {
        Ok(Json(req)) => Ok(req.token.as_str()),
        Err(rejection) => Err(TokenError::Validation(rejection.body_text())),
    };
    let outcome = state.tokens.verify_with(&user, supplied).await?;

    // 过期和不匹配都返回 401
    let status = if outcome.is_valid() {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    Ok((status, Json(VerifyResponse::from(outcome))))
}

#[axum::debug_handler]
pub async fn get_token(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = UserId::parse(&user)?;
    let token = state.tokens.get(&user).await?;
    Ok(Json(TokenResponse { token }))
}

#[axum::debug_handler]
pub async fn set_expiry(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(req): Json<ExpiryRequest>,
) -> Result<Json<ExpiryResponse>, AppError> {
    let user = UserId::parse(&user)?;
    state.tokens.set_expiry(&user, req.seconds).await?;
    Ok(Json(ExpiryResponse {
        user: user.to_string(),
        expiry_seconds: req.seconds,
    }))
}
