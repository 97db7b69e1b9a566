//! Connection Lifecycle Port - 语音连接生命周期管理
//!
//! 定义连接跟踪的抽象接口，具体实现在 infrastructure/memory 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::connection::{ConnectionError, ConnectionKey, VoiceConnection};
use crate::domain::voice::ProviderId;

/// 单个连接释放失败
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to release {key} ({provider}): {message}")]
pub struct LifecycleFailure {
    pub key: ConnectionKey,
    pub provider: ProviderId,
    pub message: String,
}

/// Connection Lifecycle Port
///
/// 同一键上的 acquire/release 串行执行，不同键互不影响
#[async_trait]
pub trait ConnectionLifecyclePort: Send + Sync {
    /// 获取连接；已存在活跃连接时直接返回，不会重复创建
    async fn acquire(&self, key: ConnectionKey, provider: ProviderId) -> VoiceConnection;

    /// CONNECTED → SPEAKING
    async fn mark_speaking(&self, key: &ConnectionKey) -> Result<VoiceConnection, ConnectionError>;

    /// SPEAKING → CONNECTED
    async fn mark_idle(&self, key: &ConnectionKey) -> Result<VoiceConnection, ConnectionError>;

    /// 释放连接并移除记录
    ///
    /// 返回 `Ok(false)` 表示没有可释放的连接。所属 provider 的
    /// `release()` 对每个获取到的连接恰好调用一次。
    async fn release(&self, key: &ConnectionKey) -> Result<bool, LifecycleFailure>;

    /// 释放全部连接，单个失败不会中断其余连接的释放
    async fn release_all(&self) -> Result<usize, Vec<LifecycleFailure>>;

    /// 查询连接
    async fn get(&self, key: &ConnectionKey) -> Option<VoiceConnection>;

    /// 列出全部活跃连接
    async fn list(&self) -> Vec<VoiceConnection>;
}
