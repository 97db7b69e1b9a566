//! Voice Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ProviderProfile;

/// 语速下限（不含）
pub const MIN_SPEED: f32 = 0.0;
/// 语速上限（含）
pub const MAX_SPEED: f32 = 3.0;

/// TTS 后端标识
///
/// 解析不区分大小写，未知标识一律视为 `None`（注册表回退到空实现）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ProviderId {
    ElevenLabs,
    /// 本地 TTS 服务（沿用 "DISCORD" 标识）
    Discord,
    Kokoro,
    #[default]
    None,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::ElevenLabs,
        ProviderId::Discord,
        ProviderId::Kokoro,
        ProviderId::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::ElevenLabs => "ELEVENLABS",
            ProviderId::Discord => "DISCORD",
            ProviderId::Kokoro => "KOKORO",
            ProviderId::None => "NONE",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "ELEVENLABS" => ProviderId::ElevenLabs,
            "DISCORD" => ProviderId::Discord,
            "KOKORO" => ProviderId::Kokoro,
            _ => ProviderId::None,
        }
    }

    /// 静态配置档
    pub fn profile(&self) -> &'static ProviderProfile {
        ProviderProfile::for_provider(*self)
    }
}

impl From<String> for ProviderId {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ProviderId> for &'static str {
    fn from(id: ProviderId) -> Self {
        id.as_str()
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 完整的语音合成配置
///
/// 不变量:
/// - provider 必须存在
/// - language 与 speed 已由配置档补全
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub provider: ProviderId,
    pub voice_id: Option<String>,
    pub api_key: Option<String>,
    pub speed: f32,
    pub language: String,
}

impl VoiceConfig {
    /// 语速是否在合法区间 (0, 3] 内
    pub fn has_valid_speed(&self) -> bool {
        self.speed.is_finite() && self.speed > MIN_SPEED && self.speed <= MAX_SPEED
    }
}

impl fmt::Debug for VoiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceConfig")
            .field("provider", &self.provider)
            .field("voice_id", &self.voice_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("speed", &self.speed)
            .field("language", &self.language)
            .finish()
    }
}

/// 调用方提交的部分配置，除 provider 外均可缺省
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialVoiceConfig {
    pub provider: ProviderId,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub language: Option<String>,
}

impl PartialVoiceConfig {
    pub fn new(provider: ProviderId) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    pub fn with_voice_id(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl From<VoiceConfig> for PartialVoiceConfig {
    fn from(config: VoiceConfig) -> Self {
        Self {
            provider: config.provider,
            voice_id: config.voice_id,
            api_key: config.api_key,
            speed: Some(config.speed),
            language: Some(config.language),
        }
    }
}

impl fmt::Debug for PartialVoiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialVoiceConfig")
            .field("provider", &self.provider)
            .field("voice_id", &self.voice_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("speed", &self.speed)
            .field("language", &self.language)
            .finish()
    }
}

/// 合成结果 - 不透明的已编码音频字节
///
/// 调用方独占返回值，内容类型由 provider 推断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    provider: ProviderId,
    data: Vec<u8>,
}

impl AudioResult {
    pub fn new(provider: ProviderId, data: Vec<u8>) -> Self {
        Self { provider, data }
    }

    pub fn empty(provider: ProviderId) -> Self {
        Self::new(provider, Vec::new())
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    /// 供文件落盘方使用的内容类型提示
    pub fn content_type(&self) -> Option<&'static str> {
        self.provider.profile().content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse_is_case_insensitive() {
        assert_eq!(ProviderId::parse("elevenlabs"), ProviderId::ElevenLabs);
        assert_eq!(ProviderId::parse(" Discord "), ProviderId::Discord);
        assert_eq!(ProviderId::parse("KOKORO"), ProviderId::Kokoro);
        assert_eq!(ProviderId::parse("polly"), ProviderId::None);
    }

    #[test]
    fn test_provider_serde() {
        let id: ProviderId = serde_json::from_str("\"kokoro\"").unwrap();
        assert_eq!(id, ProviderId::Kokoro);
        assert_eq!(serde_json::to_string(&ProviderId::ElevenLabs).unwrap(), "\"ELEVENLABS\"");
    }

    #[test]
    fn test_speed_range() {
        let mut config = VoiceConfig {
            provider: ProviderId::Discord,
            voice_id: None,
            api_key: None,
            speed: 1.0,
            language: "en-US".to_string(),
        };
        assert!(config.has_valid_speed());
        config.speed = 3.0;
        assert!(config.has_valid_speed());
        config.speed = 0.0;
        assert!(!config.has_valid_speed());
        config.speed = f32::NAN;
        assert!(!config.has_valid_speed());
    }

    #[test]
    fn test_debug_masks_api_key() {
        let partial = PartialVoiceConfig::new(ProviderId::ElevenLabs).with_api_key("sk-secret");
        let printed = format!("{:?}", partial);
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("***"));
    }

    #[test]
    fn test_audio_result_content_type() {
        let audio = AudioResult::new(ProviderId::Discord, vec![1, 2, 3]);
        assert_eq!(audio.content_type(), Some("audio/wav"));
        assert_eq!(audio.len(), 3);
        assert!(AudioResult::empty(ProviderId::None).content_type().is_none());
    }
}
