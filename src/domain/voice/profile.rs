//! Voice Context - Provider Profiles
//!
//! 每个 provider 一份静态配置档，进程启动后只读

use super::ProviderId;

/// Provider 静态配置档
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub provider: ProviderId,
    /// 默认语言（IETF 标签）
    pub default_language: &'static str,
    /// 默认语速
    pub default_speed: f32,
    /// 是否必须提供 API key
    pub requires_api_key: bool,
    /// 后端返回的音频内容类型
    pub content_type: Option<&'static str>,
    /// 面向用户的描述
    pub description: &'static str,
}

static ELEVENLABS: ProviderProfile = ProviderProfile {
    provider: ProviderId::ElevenLabs,
    default_language: "en-US",
    default_speed: 1.0,
    requires_api_key: true,
    content_type: Some("audio/mpeg"),
    description: "Use ElevenLabs for high-quality cloud voices",
};

static DISCORD: ProviderProfile = ProviderProfile {
    provider: ProviderId::Discord,
    default_language: "en-US",
    default_speed: 1.0,
    requires_api_key: false,
    content_type: Some("audio/wav"),
    description: "Use Discord's built-in TTS",
};

static KOKORO: ProviderProfile = ProviderProfile {
    provider: ProviderId::Kokoro,
    default_language: "ja-JP",
    default_speed: 1.0,
    requires_api_key: true,
    content_type: Some("audio/mpeg"),
    description: "Use Kokoro for high-quality offline voices",
};

static NONE: ProviderProfile = ProviderProfile {
    provider: ProviderId::None,
    default_language: "en-US",
    default_speed: 1.0,
    requires_api_key: false,
    content_type: None,
    description: "No voice output",
};

impl ProviderProfile {
    pub fn for_provider(provider: ProviderId) -> &'static ProviderProfile {
        match provider {
            ProviderId::ElevenLabs => &ELEVENLABS,
            ProviderId::Discord => &DISCORD,
            ProviderId::Kokoro => &KOKORO,
            ProviderId::None => &NONE,
        }
    }
}
