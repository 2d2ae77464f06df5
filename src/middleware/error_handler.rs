use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

/// 错误响应体最多记录的字节数
const MAX_LOGGED_BODY: usize = 1024;

/// 记录所有 5xx 响应（方法、路径和响应体）
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body for {} {}: {}", method, path, e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    // 只截断日志内容，返回给客户端的响应体保持完整
    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    error!(
        "Server error on {} {} - Status: {}, Body: {}{}",
        method,
        path,
        parts.status,
        String::from_utf8_lossy(logged),
        if bytes.len() > MAX_LOGGED_BODY { "..." } else { "" }
    );

    // 重置 body 以便重新构建响应
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
