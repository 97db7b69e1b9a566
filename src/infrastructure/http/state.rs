//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    ReleaseAllConnectionsHandler, ReleaseConnectionHandler, SpeakInChannelHandler,
    SynthesizeSpeechHandler,
    // Query handlers
    GetVoiceCatalogHandler, ListConnectionsHandler, ListProvidersHandler, ListVoicesHandler,
    // Ports & services
    ConnectionLifecyclePort, SpeechDispatcher,
};
use crate::domain::voice::ProviderId;

/// 应用状态
pub struct AppState {
    /// 启动时注册的 provider
    pub providers: Vec<ProviderId>,

    // ========== Command Handlers ==========
    pub synthesize_handler: SynthesizeSpeechHandler,
    pub speak_handler: SpeakInChannelHandler,
    pub release_connection_handler: ReleaseConnectionHandler,
    pub release_all_handler: ReleaseAllConnectionsHandler,

    // ========== Query Handlers ==========
    pub list_voices_handler: ListVoicesHandler,
    pub list_providers_handler: ListProvidersHandler,
    pub catalog_handler: GetVoiceCatalogHandler,
    pub list_connections_handler: ListConnectionsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        dispatcher: Arc<SpeechDispatcher>,
        lifecycle: Arc<dyn ConnectionLifecyclePort>,
    ) -> Self {
        Self {
            providers: dispatcher.registry().providers(),

            // Command handlers
            synthesize_handler: SynthesizeSpeechHandler::new(dispatcher.clone()),
            speak_handler: SpeakInChannelHandler::new(dispatcher.clone(), lifecycle.clone()),
            release_connection_handler: ReleaseConnectionHandler::new(lifecycle.clone()),
            release_all_handler: ReleaseAllConnectionsHandler::new(lifecycle.clone()),

            // Query handlers
            list_voices_handler: ListVoicesHandler::new(dispatcher.clone()),
            list_providers_handler: ListProvidersHandler::new(dispatcher),
            catalog_handler: GetVoiceCatalogHandler::new(),
            list_connections_handler: ListConnectionsHandler::new(lifecycle),
        }
    }
}

/// 测试用状态：DISCORD 返回固定 wav，ELEVENLABS 返回 401，其余走空实现
#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::application::ports::mock::{RecordingProvider, SpeakOutcome};
    use crate::application::{ProviderRegistry, VoiceConfigResolver};
    use crate::infrastructure::memory::InMemoryConnectionLifecycle;
    use std::time::Duration;

    let registry = Arc::new(
        ProviderRegistry::builder(Arc::new(RecordingProvider::audio(ProviderId::None, b"")))
            .register(Arc::new(RecordingProvider::audio(ProviderId::Discord, b"RIFFwav")))
            .register(Arc::new(RecordingProvider::new(
                ProviderId::ElevenLabs,
                SpeakOutcome::Service(401),
            )))
            .build(),
    );
    let dispatcher = Arc::new(SpeechDispatcher::new(
        VoiceConfigResolver::default(),
        registry.clone(),
    ));
    let lifecycle = InMemoryConnectionLifecycle::new(registry, Duration::from_secs(1)).arc();

    AppState::new(dispatcher, lifecycle)
}
