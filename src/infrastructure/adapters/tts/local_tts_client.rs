//! Local TTS Client - 调用本地 TTS 服务（provider 标识 "DISCORD"）
//!
//! 外部 TTS API:
//! POST http://localhost:8000/tts
//! Request: {"text": "...", "voice": "af_heart", "speed": 1.0}  (JSON)
//! Response: audio/wav binary
//!
//! GET http://localhost:8000/health
//! Response: {"status": "healthy"}

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::http_support::{map_send_error, read_audio, trim_base};
use super::session::HttpSession;
use crate::application::ports::{TtsError, VoiceProviderPort};
use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

/// en-US 使用的音色
pub const LOCAL_ENGLISH_VOICE: &str = "af_heart";
/// 其他语言使用的音色
pub const LOCAL_FALLBACK_VOICE: &str = "pm_alex";

/// TTS 推理请求体 (JSON)
#[derive(Debug, Serialize)]
struct LocalTtsRequest<'a> {
    text: &'a str,
    voice: &'static str,
    speed: f32,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// 本地 TTS 客户端配置
#[derive(Debug, Clone)]
pub struct LocalTtsClientConfig {
    /// TTS 服务基础 URL
    pub base_url: String,
    /// 会话级超时（秒），单次请求另按文本长度估算
    pub timeout_secs: u64,
    /// 释放会话时等待进行中请求的上限
    pub release_timeout: Duration,
}

impl Default for LocalTtsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
            release_timeout: Duration::from_secs(5),
        }
    }
}

impl LocalTtsClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_release_timeout(mut self, timeout: Duration) -> Self {
        self.release_timeout = timeout;
        self
    }
}

/// 本地 TTS 客户端
///
/// 持有到本地服务的持久会话，`release` 关闭会话
pub struct LocalTtsClient {
    config: LocalTtsClientConfig,
    session: HttpSession,
}

impl LocalTtsClient {
    pub fn new(config: LocalTtsClientConfig) -> Self {
        let session = HttpSession::new(config.timeout_secs);
        Self { config, session }
    }

    fn tts_url(&self) -> String {
        format!("{}/tts", trim_base(&self.config.base_url))
    }

    fn health_url(&self) -> String {
        format!("{}/health", trim_base(&self.config.base_url))
    }

    pub async fn has_open_session(&self) -> bool {
        self.session.is_open().await
    }
}

/// 按语言选择音色
pub fn voice_for_language(language: &str) -> &'static str {
    if language == "en-US" {
        LOCAL_ENGLISH_VOICE
    } else {
        LOCAL_FALLBACK_VOICE
    }
}

/// 按文本长度估算超时：每 15 个字符约 2 秒，至少 30 秒，另加 10 秒余量
pub fn estimate_timeout(text: &str) -> Duration {
    let chars = text.chars().count() as u64;
    let secs = std::cmp::max(30, chars.div_ceil(15) * 2) + 10;
    Duration::from_secs(secs)
}

#[async_trait]
impl VoiceProviderPort for LocalTtsClient {
    fn id(&self) -> ProviderId {
        ProviderId::Discord
    }

    async fn speak(&self, text: &str, config: &VoiceConfig) -> Result<AudioResult, TtsError> {
        let voice = voice_for_language(&config.language);
        let timeout = estimate_timeout(text);
        let body = LocalTtsRequest {
            text,
            voice,
            speed: config.speed,
        };

        tracing::debug!(
            url = %self.tts_url(),
            text_len = text.len(),
            voice = voice,
            language = %config.language,
            timeout_secs = timeout.as_secs(),
            "Sending local TTS request"
        );

        let client = self.session.enter().await?;
        let response = client
            .post(self.tts_url())
            .header(ACCEPT, "audio/wav")
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, "local TTS service"))?;
        let audio = read_audio(response).await?;
        drop(client);

        tracing::info!(voice = voice, audio_size = audio.len(), "Local TTS completed");

        Ok(AudioResult::new(ProviderId::Discord, audio))
    }

    async fn list_voices(&self) -> Vec<String> {
        vec![
            LOCAL_ENGLISH_VOICE.to_string(),
            LOCAL_FALLBACK_VOICE.to_string(),
        ]
    }

    async fn release(&self) -> Result<(), TtsError> {
        self.session.close(self.config.release_timeout).await
    }

    async fn health_check(&self) -> bool {
        let client = match self.session.enter().await {
            Ok(client) => client,
            Err(_) => return false,
        };
        let response = match client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            _ => return false,
        };
        match response.json::<HealthResponse>().await {
            Ok(health) => health.status == "healthy",
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::tts::fake_backend::FakeBackend;
    use std::sync::Arc;

    fn config(language: &str) -> VoiceConfig {
        VoiceConfig {
            provider: ProviderId::Discord,
            voice_id: None,
            api_key: None,
            speed: 1.0,
            language: language.to_string(),
        }
    }

    #[test]
    fn test_voice_mapping() {
        assert_eq!(voice_for_language("en-US"), "af_heart");
        assert_eq!(voice_for_language("pt-BR"), "pm_alex");
        assert_eq!(voice_for_language("ja-JP"), "pm_alex");
    }

    #[test]
    fn test_timeout_estimate() {
        assert_eq!(estimate_timeout("short"), Duration::from_secs(40));
        let long = "a".repeat(300);
        assert_eq!(estimate_timeout(&long), Duration::from_secs(50));
    }

    #[test]
    fn test_config_builder() {
        let config = LocalTtsClientConfig::new("http://example.com:9000")
            .with_release_timeout(Duration::from_secs(1));
        assert_eq!(config.base_url, "http://example.com:9000");
        assert_eq!(config.release_timeout, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_request_wire_format() {
        let backend = FakeBackend::audio(b"RIFF....WAVEfmt ", "audio/wav").await;
        let client = LocalTtsClient::new(LocalTtsClientConfig::new(backend.base_url.clone()));

        let audio = client.speak("Olá", &config("pt-BR")).await.unwrap();
        assert_eq!(audio.data(), b"RIFF....WAVEfmt ");
        assert_eq!(audio.provider(), ProviderId::Discord);

        let req = &backend.requests()[0];
        assert_eq!(req.path, "/tts");
        assert_eq!(req.header("accept"), Some("audio/wav"));
        assert!(req.header("authorization").is_none());
        assert_eq!(req.body["text"], "Olá");
        assert_eq!(req.body["voice"], "pm_alex");
        assert_eq!(req.body["speed"], 1.0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // 绑定后立即释放，得到一个无人监听的端口
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = LocalTtsClient::new(LocalTtsClientConfig::new(format!("http://{}", addr)));
        let err = client.speak("Hello", &config("en-US")).await.unwrap_err();
        assert!(matches!(err, TtsError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_release_closes_session_and_reopens() {
        let backend = FakeBackend::audio(b"wav", "audio/wav").await;
        let client = LocalTtsClient::new(LocalTtsClientConfig::new(backend.base_url.clone()));

        client.speak("Hello", &config("en-US")).await.unwrap();
        assert!(client.has_open_session().await);

        client.release().await.unwrap();
        client.release().await.unwrap();
        assert!(!client.has_open_session().await);

        client.speak("Again", &config("en-US")).await.unwrap();
        assert!(client.has_open_session().await);
        assert_eq!(backend.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_release_waits_for_in_flight_speak() {
        let backend =
            FakeBackend::slow(b"wav", "audio/wav", Duration::from_millis(200)).await;
        let client = Arc::new(LocalTtsClient::new(
            LocalTtsClientConfig::new(backend.base_url.clone())
                .with_release_timeout(Duration::from_secs(5)),
        ));

        let speaking = {
            let client = client.clone();
            tokio::spawn(async move { client.speak("Hello", &config("en-US")).await })
        };
        // 等待请求真正发出
        while backend.requests().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let started = std::time::Instant::now();
        client.release().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert!(!client.has_open_session().await);
        assert_eq!(speaking.await.unwrap().unwrap().data(), b"wav");
    }

    #[tokio::test]
    async fn test_health_check() {
        let healthy = FakeBackend::audio(br#"{"status":"healthy"}"#, "application/json").await;
        let client = LocalTtsClient::new(LocalTtsClientConfig::new(healthy.base_url.clone()));
        assert!(client.health_check().await);

        let starting = FakeBackend::failing(503, "loading models").await;
        let client = LocalTtsClient::new(LocalTtsClientConfig::new(starting.base_url.clone()));
        assert!(!client.health_check().await);
    }
}
