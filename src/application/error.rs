//! 应用层错误定义
//!
//! 统一的语音合成与连接管理错误类型

use thiserror::Error;

use crate::application::ports::{LifecycleFailure, TtsError};
use crate::domain::connection::ConnectionError;
use crate::domain::voice::ProviderId;

/// 应用层错误
#[derive(Debug, Error)]
pub enum VoiceError {
    /// 输入无效（空文本等），不会发起网络请求
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 所选 provider 缺少必需配置
    #[error("{provider} {operation} is not configured: {message}")]
    Configuration {
        provider: ProviderId,
        operation: &'static str,
        message: String,
    },

    /// 后端或网络失败
    #[error("{provider} {operation} failed: {message}")]
    Provider {
        provider: ProviderId,
        operation: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// 调用方取消
    #[error("{provider} {operation} cancelled")]
    Cancelled {
        provider: ProviderId,
        operation: &'static str,
    },

    /// 连接释放失败（汇总）
    #[error("Failed to release {} voice connection(s)", .0.len())]
    Lifecycle(Vec<LifecycleFailure>),

    /// 连接状态错误
    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl VoiceError {
    /// 创建输入无效错误
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// 为 provider 错误附加调用上下文
    pub fn from_provider(provider: ProviderId, operation: &'static str, err: TtsError) -> Self {
        let status = err.status();
        match err {
            TtsError::Configuration(message) => Self::Configuration {
                provider,
                operation,
                message,
            },
            other => Self::Provider {
                provider,
                operation,
                status,
                message: other.to_string(),
            },
        }
    }

    /// 关联的 provider（如有）
    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            VoiceError::Configuration { provider, .. }
            | VoiceError::Provider { provider, .. }
            | VoiceError::Cancelled { provider, .. } => Some(*provider),
            _ => None,
        }
    }

    /// 面向最终用户的通用提示，不暴露后端诊断信息
    pub fn user_message(&self) -> &'static str {
        match self {
            VoiceError::InvalidInput(_) => "The text to speak is invalid",
            VoiceError::Configuration { .. } => "Voice output is not configured",
            VoiceError::Connection(_) => "No active voice connection",
            _ => "Voice generation failed, please try again later",
        }
    }
}

impl From<LifecycleFailure> for VoiceError {
    fn from(failure: LifecycleFailure) -> Self {
        Self::Lifecycle(vec![failure])
    }
}
