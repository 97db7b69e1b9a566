//! TTS Adapter - 各 provider 的客户端实现

mod elevenlabs_client;
mod http_support;
mod kokoro_client;
mod local_tts_client;
mod null_client;
mod session;

#[cfg(test)]
pub(crate) mod fake_backend;

pub use elevenlabs_client::{
    ElevenLabsClientConfig, ElevenLabsTtsClient, ELEVENLABS_DEFAULT_VOICE, ELEVENLABS_MODEL_ID,
};
pub use kokoro_client::{KokoroClientConfig, KokoroTtsClient, KOKORO_DEFAULT_VOICE};
pub use local_tts_client::{
    estimate_timeout, voice_for_language, LocalTtsClient, LocalTtsClientConfig,
};
pub use null_client::NullTtsClient;
pub use session::HttpSession;

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TtsError;
use crate::application::services::ProviderRegistry;
use crate::config::TtsConfig;

/// 按配置构建全部 provider 并注册
pub fn build_registry(config: &TtsConfig) -> Result<ProviderRegistry, TtsError> {
    let elevenlabs = ElevenLabsTtsClient::new(ElevenLabsClientConfig {
        base_url: config.elevenlabs_url.clone(),
        timeout_secs: config.timeout_secs,
        default_api_key: config.elevenlabs_api_key.clone(),
    })?;

    let kokoro = KokoroTtsClient::new(KokoroClientConfig {
        base_url: config.kokoro_url.clone(),
        timeout_secs: config.timeout_secs,
        default_api_key: config.kokoro_api_key.clone(),
    })?;

    let local = LocalTtsClient::new(LocalTtsClientConfig {
        base_url: config.local_tts_url.clone(),
        timeout_secs: config.timeout_secs,
        release_timeout: Duration::from_secs(config.release_timeout_secs),
    });

    let registry = ProviderRegistry::builder(Arc::new(NullTtsClient::new()))
        .register(Arc::new(elevenlabs))
        .register(Arc::new(local))
        .register(Arc::new(kokoro))
        .build();

    tracing::info!(
        elevenlabs_url = %config.elevenlabs_url,
        kokoro_url = %config.kokoro_url,
        local_tts_url = %config.local_tts_url,
        "TTS providers registered"
    );

    Ok(registry)
}
