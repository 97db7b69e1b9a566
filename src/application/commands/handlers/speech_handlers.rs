//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::{SpeakInChannel, SynthesizeSpeech};
use crate::application::error::VoiceError;
use crate::application::ports::ConnectionLifecyclePort;
use crate::application::services::SpeechDispatcher;
use crate::domain::connection::ConnectionKey;
use crate::domain::voice::AudioResult;

// ============================================================================
// SynthesizeSpeech
// ============================================================================

/// SynthesizeSpeech Handler
pub struct SynthesizeSpeechHandler {
    dispatcher: Arc<SpeechDispatcher>,
}

impl SynthesizeSpeechHandler {
    pub fn new(dispatcher: Arc<SpeechDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, command: SynthesizeSpeech) -> Result<AudioResult, VoiceError> {
        self.dispatcher.synthesize(&command.text, command.voice).await
    }
}

// ============================================================================
// SpeakInChannel
// ============================================================================

/// SpeakInChannel Handler
///
/// 校验 → 获取频道连接 → SPEAKING → 合成 → CONNECTED（失败时同样回到 CONNECTED）
///
/// 校验失败的请求不会创建连接
pub struct SpeakInChannelHandler {
    dispatcher: Arc<SpeechDispatcher>,
    lifecycle: Arc<dyn ConnectionLifecyclePort>,
}

impl SpeakInChannelHandler {
    pub fn new(
        dispatcher: Arc<SpeechDispatcher>,
        lifecycle: Arc<dyn ConnectionLifecyclePort>,
    ) -> Self {
        Self {
            dispatcher,
            lifecycle,
        }
    }

    pub async fn handle(&self, command: SpeakInChannel) -> Result<AudioResult, VoiceError> {
        let prepared = self.dispatcher.prepare(&command.text, command.voice)?;

        let key = ConnectionKey::new(command.guild_id, command.channel_id);
        let connection = self
            .lifecycle
            .acquire(key.clone(), prepared.provider())
            .await;
        self.lifecycle.mark_speaking(&key).await?;

        tracing::debug!(
            connection_id = %connection.id(),
            guild_id = %key.guild_id,
            channel_id = %key.channel_id,
            "Speaking in voice channel"
        );

        let result = self
            .dispatcher
            .synthesize_prepared(&command.text, &prepared)
            .await;

        // 期间连接可能已被释放
        if let Err(e) = self.lifecycle.mark_idle(&key).await {
            tracing::debug!(key = %key, error = %e, "Connection gone before speech finished");
        }

        result
    }
}
