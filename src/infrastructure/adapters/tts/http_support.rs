//! 各 HTTP provider 共用的请求与响应处理

use reqwest::{Client, Response};
use std::time::Duration;

use crate::application::ports::TtsError;

/// 构建带超时的 HTTP 客户端
pub(super) fn build_http_client(timeout_secs: u64) -> Result<Client, TtsError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| TtsError::NetworkError(e.to_string()))
}

/// 发送失败分类
pub(super) fn map_send_error(e: reqwest::Error, service: &str) -> TtsError {
    if e.is_timeout() {
        TtsError::Timeout
    } else if e.is_connect() {
        TtsError::NetworkError(format!("Cannot connect to {}: {}", service, e))
    } else {
        TtsError::NetworkError(e.to_string())
    }
}

/// 读取音频响应体；非 2xx 时保留状态码与响应内容
pub(super) async fn read_audio(response: Response) -> Result<Vec<u8>, TtsError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TtsError::ServiceError {
            status: status.as_u16(),
            body,
        });
    }

    let audio = response
        .bytes()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                TtsError::Timeout
            } else {
                TtsError::InvalidResponse(format!("Failed to read audio: {}", e))
            }
        })?
        .to_vec();
    Ok(audio)
}

/// 去掉末尾的 `/`，便于拼接路径
pub(super) fn trim_base(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// 取第一个非空白的 key；空白 key 视为未配置
pub(super) fn select_api_key<'a>(
    explicit: Option<&'a str>,
    fallback: Option<&'a str>,
) -> Option<&'a str> {
    explicit
        .into_iter()
        .chain(fallback)
        .find(|key| !key.trim().is_empty())
}
