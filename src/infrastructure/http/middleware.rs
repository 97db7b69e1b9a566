//! HTTP Middleware
//!
//! 请求日志：HTTP 错误与音频响应

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::CONTENT_LENGTH;
use std::time::Instant;

use super::handlers::VOICE_PROVIDER_HEADER;

/// 请求日志中间件
///
/// 4xx/5xx 响应在这里记录（如请求体解析失败、请求体过大、路由不存在）；
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录。
/// 音频响应额外记录产出的 provider 与字节数。
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    } else if let Some(provider) = header_str(&response, VOICE_PROVIDER_HEADER) {
        tracing::debug!(
            path = %path,
            provider = %provider,
            audio_bytes = header_str(&response, CONTENT_LENGTH.as_str()).unwrap_or("0"),
            elapsed_ms,
            "Audio response sent"
        );
    }

    response
}

fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
