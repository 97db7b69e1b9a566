//! Voice Provider Port - TTS 后端能力抽象
//!
//! 每个后端一个实现，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

/// TTS 后端错误
#[derive(Debug, Error)]
pub enum TtsError {
    /// 缺少必需的 key 等配置，未发起任何网络请求
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session release timed out after {0:?}")]
    ReleaseTimeout(Duration),
}

impl TtsError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// 后端返回的 HTTP 状态码（如有）
    pub fn status(&self) -> Option<u16> {
        match self {
            TtsError::ServiceError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, TtsError::Configuration(_))
    }
}

/// Voice Provider Port
///
/// 能力集合 {speak, list_voices, release}。实现内部不做重试。
#[async_trait]
pub trait VoiceProviderPort: Send + Sync {
    /// 该实现对应的 provider 标识
    fn id(&self) -> ProviderId;

    /// 合成语音，返回后端原始音频字节
    async fn speak(&self, text: &str, config: &VoiceConfig) -> Result<AudioResult, TtsError>;

    /// 后端已知的音色列表
    async fn list_voices(&self) -> Vec<String>;

    /// 释放持久会话。幂等，已释放的实例再次调用不会报错
    async fn release(&self) -> Result<(), TtsError>;

    /// 检查后端是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
