//! Null TTS Client - "NONE" provider
//!
//! 不发起任何请求，始终返回空音频

use async_trait::async_trait;

use crate::application::ports::{TtsError, VoiceProviderPort};
use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

#[derive(Debug, Default, Clone, Copy)]
pub struct NullTtsClient;

impl NullTtsClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VoiceProviderPort for NullTtsClient {
    fn id(&self) -> ProviderId {
        ProviderId::None
    }

    async fn speak(&self, text: &str, _config: &VoiceConfig) -> Result<AudioResult, TtsError> {
        tracing::trace!(text_len = text.len(), "NullTtsClient: voice output disabled");
        Ok(AudioResult::empty(ProviderId::None))
    }

    async fn list_voices(&self) -> Vec<String> {
        Vec::new()
    }

    async fn release(&self) -> Result<(), TtsError> {
        Ok(())
    }
}
