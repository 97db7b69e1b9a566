//! ElevenLabs TTS Client
//!
//! 外部 API:
//! POST https://api.elevenlabs.io/v1/text-to-speech/{voice_id}
//! Header: xi-api-key
//! Request: {"text", "model_id", "voice_settings": {...}}  (JSON)
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Serialize;

use super::http_support::{build_http_client, map_send_error, read_audio, select_api_key};
use crate::application::ports::{TtsError, VoiceProviderPort};
use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

/// 未指定 voice_id 时使用的默认音色
pub const ELEVENLABS_DEFAULT_VOICE: &str = "pNInz6obpgDQGcFmaJgB";
/// 合成模型
pub const ELEVENLABS_MODEL_ID: &str = "eleven_multilingual_v2";

const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.75;
const STYLE: f32 = 0.5;

#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: ElevenLabsVoiceSettings,
}

#[derive(Debug, Serialize)]
struct ElevenLabsVoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    speed: f32,
}

/// ElevenLabs 客户端配置
#[derive(Clone)]
pub struct ElevenLabsClientConfig {
    /// 服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 进程级默认 key，调用配置中没有 key 时使用
    pub default_api_key: Option<String>,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            timeout_secs: 60,
            default_api_key: None,
        }
    }
}

/// ElevenLabs 客户端（仅网络调用，无持久会话）
pub struct ElevenLabsTtsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsTtsClient {
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = build_http_client(config.timeout_secs)?;
        Ok(Self { client, config })
    }

    /// voice_id 作为单个路径段编码，不能改写请求目标
    fn speech_url(&self, voice_id: &str) -> Result<Url, TtsError> {
        if matches!(voice_id, "." | "..") {
            return Err(TtsError::configuration(format!(
                "Invalid ElevenLabs voice id: {}",
                voice_id
            )));
        }

        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| TtsError::configuration(format!("Invalid ElevenLabs URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| TtsError::configuration("ElevenLabs URL cannot be a base"))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", voice_id]);
        Ok(url)
    }
}

#[async_trait]
impl VoiceProviderPort for ElevenLabsTtsClient {
    fn id(&self) -> ProviderId {
        ProviderId::ElevenLabs
    }

    async fn speak(&self, text: &str, config: &VoiceConfig) -> Result<AudioResult, TtsError> {
        let api_key = select_api_key(
            config.api_key.as_deref(),
            self.config.default_api_key.as_deref(),
        )
        .ok_or_else(|| TtsError::configuration("ElevenLabs API key not configured"))?;

        let voice_id = config.voice_id.as_deref().unwrap_or(ELEVENLABS_DEFAULT_VOICE);
        let url = self.speech_url(voice_id)?;
        let body = ElevenLabsRequest {
            text,
            model_id: ELEVENLABS_MODEL_ID,
            voice_settings: ElevenLabsVoiceSettings {
                stability: STABILITY,
                similarity_boost: SIMILARITY_BOOST,
                style: STYLE,
                speed: config.speed,
            },
        };

        tracing::debug!(
            voice_id = %voice_id,
            text_len = text.len(),
            "Sending ElevenLabs TTS request"
        );

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "audio/mpeg")
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, "ElevenLabs"))?;

        let audio = read_audio(response).await?;
        Ok(AudioResult::new(ProviderId::ElevenLabs, audio))
    }

    async fn list_voices(&self) -> Vec<String> {
        vec![ELEVENLABS_DEFAULT_VOICE.to_string()]
    }

    async fn release(&self) -> Result<(), TtsError> {
        Ok(())
    }
}
