//! Connection Query Handlers

use std::sync::Arc;

use crate::application::ports::ConnectionLifecyclePort;
use crate::application::queries::ListConnections;
use crate::domain::connection::VoiceConnection;

/// ListConnections Handler
pub struct ListConnectionsHandler {
    lifecycle: Arc<dyn ConnectionLifecyclePort>,
}

impl ListConnectionsHandler {
    pub fn new(lifecycle: Arc<dyn ConnectionLifecyclePort>) -> Self {
        Self { lifecycle }
    }

    pub async fn handle(&self, _query: ListConnections) -> Vec<VoiceConnection> {
        self.lifecycle.list().await
    }
}
