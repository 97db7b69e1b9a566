//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::VoiceError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    fn parts(&self) -> (i32, &str) {
        match self {
            ApiError::NotFound(msg) => (errno::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (errno::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (errno::INTERNAL_ERROR, msg),
            ApiError::ServiceUnavailable(msg) => (errno::SERVICE_UNAVAILABLE, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, msg) = self.parts();
        match &self {
            ApiError::NotFound(_) | ApiError::BadRequest(_) => {
                tracing::warn!(errno = code, error = %msg, "Request rejected");
            }
            ApiError::Internal(_) | ApiError::ServiceUnavailable(_) => {
                tracing::error!(errno = code, error = %msg, "Request failed");
            }
        }

        (StatusCode::OK, Json(ErrorResponse::new(code, msg))).into_response()
    }
}

/// 后端诊断信息只进日志，响应中使用通用提示
impl From<VoiceError> for ApiError {
    fn from(e: VoiceError) -> Self {
        tracing::warn!(provider = ?e.provider(), error = %e, "Voice operation failed");

        let message = e.user_message().to_string();
        match e {
            VoiceError::InvalidInput(_) => ApiError::BadRequest(message),
            VoiceError::Connection(_) => ApiError::NotFound(message),
            VoiceError::Configuration { .. } | VoiceError::Provider { .. } => {
                ApiError::ServiceUnavailable(message)
            }
            VoiceError::Cancelled { .. } | VoiceError::Lifecycle(_) => ApiError::Internal(message),
        }
    }
}
