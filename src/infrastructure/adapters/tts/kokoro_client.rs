//! Kokoro TTS Client
//!
//! 外部 API:
//! POST https://api.kokoro.ai/v1/tts
//! Header: Authorization: Bearer {api_key}
//! Request: {"text", "voice_id", "language", "speed"}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Serialize;

use super::http_support::{
    build_http_client, map_send_error, read_audio, select_api_key, trim_base,
};
use crate::application::ports::{TtsError, VoiceProviderPort};
use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

/// 未指定 voice_id 时发送的音色
pub const KOKORO_DEFAULT_VOICE: &str = "default";

#[derive(Debug, Serialize)]
struct KokoroRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    language: &'a str,
    speed: f32,
}

/// Kokoro 客户端配置
#[derive(Clone)]
pub struct KokoroClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// 进程级默认 key
    pub default_api_key: Option<String>,
}

impl Default for KokoroClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.kokoro.ai".to_string(),
            timeout_secs: 60,
            default_api_key: None,
        }
    }
}

pub struct KokoroTtsClient {
    client: Client,
    config: KokoroClientConfig,
}

impl KokoroTtsClient {
    pub fn new(config: KokoroClientConfig) -> Result<Self, TtsError> {
        let client = build_http_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    fn tts_url(&self) -> String {
        format!("{}/v1/tts", trim_base(&self.config.base_url))
    }
}

#[async_trait]
impl VoiceProviderPort for KokoroTtsClient {
    fn id(&self) -> ProviderId {
        ProviderId::Kokoro
    }

    async fn speak(&self, text: &str, config: &VoiceConfig) -> Result<AudioResult, TtsError> {
        let api_key = select_api_key(
            config.api_key.as_deref(),
            self.config.default_api_key.as_deref(),
        )
        .ok_or_else(|| TtsError::configuration("Kokoro API key not configured"))?;

        let body = KokoroRequest {
            text,
            voice_id: config.voice_id.as_deref().unwrap_or(KOKORO_DEFAULT_VOICE),
            language: &config.language,
            speed: config.speed,
        };

        tracing::debug!(
            voice_id = %body.voice_id,
            language = %body.language,
            text_len = text.len(),
            "Sending Kokoro TTS request"
        );

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(api_key)
            .header(ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, "Kokoro"))?;

        let audio = read_audio(response).await?;
        Ok(AudioResult::new(ProviderId::Kokoro, audio))
    }

    async fn list_voices(&self) -> Vec<String> {
        vec![KOKORO_DEFAULT_VOICE.to_string()]
    }

    async fn release(&self) -> Result<(), TtsError> {
        Ok(())
    }
}
