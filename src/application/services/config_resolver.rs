//! Voice Config Resolver - 合成配置补全
//!
//! 优先级（从高到低）：
//! 1. 调用方显式传入的字段
//! 2. provider 配置档默认值（language、speed）
//! 3. 进程级密钥（api_key 缺省时）
//!
//! 纯函数、不会失败；必需字段缺失由 provider 在调用时报告。

use crate::config::TtsConfig;
use crate::domain::voice::{PartialVoiceConfig, ProviderId, VoiceConfig};

/// 合成配置解析器
#[derive(Clone, Default)]
pub struct VoiceConfigResolver {
    elevenlabs_api_key: Option<String>,
    kokoro_api_key: Option<String>,
}

impl VoiceConfigResolver {
    pub fn new(elevenlabs_api_key: Option<String>, kokoro_api_key: Option<String>) -> Self {
        Self {
            elevenlabs_api_key: non_blank(elevenlabs_api_key),
            kokoro_api_key: non_blank(kokoro_api_key),
        }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::new(
            config.elevenlabs_api_key.clone(),
            config.kokoro_api_key.clone(),
        )
    }

    /// 补全配置；不会生成 voice_id，缺省时由各 provider 自行回退
    pub fn resolve(&self, requested: PartialVoiceConfig) -> VoiceConfig {
        let profile = requested.provider.profile();

        let api_key = non_blank(requested.api_key).or_else(|| self.process_key(requested.provider));

        VoiceConfig {
            provider: requested.provider,
            voice_id: non_blank(requested.voice_id),
            api_key,
            speed: requested.speed.unwrap_or(profile.default_speed),
            language: non_blank(requested.language)
                .unwrap_or_else(|| profile.default_language.to_string()),
        }
    }

    fn process_key(&self, provider: ProviderId) -> Option<String> {
        match provider {
            ProviderId::ElevenLabs => self.elevenlabs_api_key.clone(),
            ProviderId::Kokoro => self.kokoro_api_key.clone(),
            ProviderId::Discord | ProviderId::None => None,
        }
    }
}

impl std::fmt::Debug for VoiceConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceConfigResolver")
            .field("elevenlabs_api_key", &self.elevenlabs_api_key.is_some())
            .field("kokoro_api_key", &self.kokoro_api_key.is_some())
            .finish()
    }
}

/// 空白字符串视为缺省
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_fill_gaps() {
        let resolver = VoiceConfigResolver::default();
        let config = resolver.resolve(PartialVoiceConfig::new(ProviderId::Kokoro));

        assert_eq!(config.provider, ProviderId::Kokoro);
        assert_eq!(config.language, "ja-JP");
        assert_eq!(config.speed, 1.0);
        assert!(config.voice_id.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_explicit_fields_win() {
        let resolver = VoiceConfigResolver::new(Some("global".to_string()), None);
        let config = resolver.resolve(
            PartialVoiceConfig::new(ProviderId::ElevenLabs)
                .with_api_key("per-call")
                .with_speed(1.5)
                .with_language("pt-BR")
                .with_voice_id("custom"),
        );

        assert_eq!(config.api_key.as_deref(), Some("per-call"));
        assert_eq!(config.speed, 1.5);
        assert_eq!(config.language, "pt-BR");
        assert_eq!(config.voice_id.as_deref(), Some("custom"));
    }

    #[test]
    fn test_process_key_used_when_absent() {
        let resolver =
            VoiceConfigResolver::new(Some("eleven".to_string()), Some("kokoro".to_string()));

        let eleven = resolver.resolve(PartialVoiceConfig::new(ProviderId::ElevenLabs));
        assert_eq!(eleven.api_key.as_deref(), Some("eleven"));

        let kokoro = resolver.resolve(PartialVoiceConfig::new(ProviderId::Kokoro));
        assert_eq!(kokoro.api_key.as_deref(), Some("kokoro"));

        let local = resolver.resolve(PartialVoiceConfig::new(ProviderId::Discord));
        assert!(local.api_key.is_none());
    }

    #[test]
    fn test_blank_values_are_absent() {
        let resolver = VoiceConfigResolver::new(Some("eleven".to_string()), None);
        let config = resolver.resolve(
            PartialVoiceConfig::new(ProviderId::ElevenLabs)
                .with_api_key("  ")
                .with_voice_id("")
                .with_language(""),
        );

        assert_eq!(config.api_key.as_deref(), Some("eleven"));
        assert!(config.voice_id.is_none());
        assert_eq!(config.language, "en-US");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = VoiceConfigResolver::new(Some("eleven".to_string()), None);
        let full = VoiceConfig {
            provider: ProviderId::ElevenLabs,
            voice_id: Some("voice".to_string()),
            api_key: Some("key".to_string()),
            speed: 0.8,
            language: "en-GB".to_string(),
        };

        let once = resolver.resolve(full.clone().into());
        assert_eq!(once, full);

        let twice = resolver.resolve(once.clone().into());
        assert_eq!(twice, once);

        let partial = resolver.resolve(PartialVoiceConfig::new(ProviderId::Kokoro));
        assert_eq!(resolver.resolve(partial.clone().into()), partial);
    }
}
