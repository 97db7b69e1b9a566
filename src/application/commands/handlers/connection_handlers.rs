//! Connection Command Handlers

use std::sync::Arc;

use crate::application::commands::{ReleaseAllConnections, ReleaseConnection};
use crate::application::error::VoiceError;
use crate::application::ports::ConnectionLifecyclePort;
use crate::domain::connection::ConnectionKey;

// ============================================================================
// ReleaseConnection
// ============================================================================

/// ReleaseConnection Handler
pub struct ReleaseConnectionHandler {
    lifecycle: Arc<dyn ConnectionLifecyclePort>,
}

impl ReleaseConnectionHandler {
    pub fn new(lifecycle: Arc<dyn ConnectionLifecyclePort>) -> Self {
        Self { lifecycle }
    }

    /// 返回是否确实释放了连接
    pub async fn handle(&self, command: ReleaseConnection) -> Result<bool, VoiceError> {
        let key = ConnectionKey::new(command.guild_id, command.channel_id);
        Ok(self.lifecycle.release(&key).await?)
    }
}

// ============================================================================
// ReleaseAllConnections
// ============================================================================

/// ReleaseAllConnections Handler
pub struct ReleaseAllConnectionsHandler {
    lifecycle: Arc<dyn ConnectionLifecyclePort>,
}

impl ReleaseAllConnectionsHandler {
    pub fn new(lifecycle: Arc<dyn ConnectionLifecyclePort>) -> Self {
        Self { lifecycle }
    }

    /// 返回释放的连接数；有失败时汇总为 `VoiceError::Lifecycle`
    pub async fn handle(&self, _command: ReleaseAllConnections) -> Result<usize, VoiceError> {
        self.lifecycle.release_all().await.map_err(|failures| {
            for failure in &failures {
                tracing::error!(error = %failure, "Voice connection release failed");
            }
            VoiceError::Lifecycle(failures)
        })
    }
}
