//! Speech Dispatcher - 语音合成门面
//!
//! 流程：校验输入 → 补全配置 → 查找 provider → 调用 speak。
//! provider 只在发起 I/O 之前根据配置选择一次，调用失败不会回退到其他 provider。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{ProviderRegistry, VoiceConfigResolver};
use crate::application::error::VoiceError;
use crate::application::ports::VoiceProviderPort;
use crate::domain::voice::{AudioResult, PartialVoiceConfig, ProviderId, VoiceConfig, MAX_SPEED};

const SYNTHESIZE: &str = "synthesize";

/// 已校验并选定 provider 的合成请求
pub struct PreparedSpeech {
    config: VoiceConfig,
    client: Arc<dyn VoiceProviderPort>,
}

impl PreparedSpeech {
    pub fn provider(&self) -> ProviderId {
        self.config.provider
    }
}

/// 语音合成调度器
pub struct SpeechDispatcher {
    resolver: VoiceConfigResolver,
    registry: Arc<ProviderRegistry>,
}

impl SpeechDispatcher {
    pub fn new(resolver: VoiceConfigResolver, registry: Arc<ProviderRegistry>) -> Self {
        Self { resolver, registry }
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    /// 合成语音
    ///
    /// 返回 provider 产出的音频，不做任何后处理或缓存
    pub async fn synthesize(
        &self,
        text: &str,
        requested: PartialVoiceConfig,
    ) -> Result<AudioResult, VoiceError> {
        let prepared = self.prepare(text, requested)?;
        self.synthesize_prepared(text, &prepared).await
    }

    /// 合成已通过 [`prepare`](Self::prepare) 校验的请求
    pub async fn synthesize_prepared(
        &self,
        text: &str,
        prepared: &PreparedSpeech,
    ) -> Result<AudioResult, VoiceError> {
        self.invoke(prepared.client.as_ref(), text, &prepared.config).await
    }

    /// 可取消的合成
    ///
    /// 取消时丢弃进行中的请求 future（reqwest 会随之中止连接），迟到的响应不会被使用
    pub async fn synthesize_with_cancel(
        &self,
        text: &str,
        requested: PartialVoiceConfig,
        cancel: &CancellationToken,
    ) -> Result<AudioResult, VoiceError> {
        let prepared = self.prepare(text, requested)?;
        let provider = prepared.provider();

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(provider = %provider, "Speech synthesis cancelled by caller");
                Err(VoiceError::Cancelled { provider, operation: SYNTHESIZE })
            }
            result = self.synthesize_prepared(text, &prepared) => result,
        }
    }

    /// 列出 provider 的音色
    pub async fn list_voices(&self, provider: ProviderId) -> Vec<String> {
        self.registry.resolve(provider).list_voices().await
    }

    /// 检查 provider 是否可用
    pub async fn health_check(&self, provider: ProviderId) -> bool {
        self.registry.resolve(provider).health_check().await
    }

    /// 校验与选择，全部在 I/O 之前完成
    pub fn prepare(
        &self,
        text: &str,
        requested: PartialVoiceConfig,
    ) -> Result<PreparedSpeech, VoiceError> {
        if text.trim().is_empty() {
            return Err(VoiceError::invalid_input("Text to synthesize cannot be empty"));
        }

        let config = self.resolver.resolve(requested);
        if !config.has_valid_speed() {
            return Err(VoiceError::invalid_input(format!(
                "Speed must be within (0, {}], got {}",
                MAX_SPEED, config.speed
            )));
        }

        let client = self.registry.resolve(config.provider);
        Ok(PreparedSpeech { config, client })
    }

    async fn invoke(
        &self,
        client: &dyn VoiceProviderPort,
        text: &str,
        config: &VoiceConfig,
    ) -> Result<AudioResult, VoiceError> {
        tracing::debug!(
            provider = %config.provider,
            text_len = text.len(),
            language = %config.language,
            speed = config.speed,
            "Dispatching speech synthesis"
        );

        match client.speak(text, config).await {
            Ok(audio) => {
                tracing::info!(
                    provider = %config.provider,
                    audio_size = audio.len(),
                    "Speech synthesis completed"
                );
                Ok(audio)
            }
            Err(e) => {
                tracing::warn!(provider = %config.provider, error = %e, "Speech synthesis failed");
                Err(VoiceError::from_provider(config.provider, SYNTHESIZE, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::mock::{RecordingProvider, SpeakOutcome};
    use crate::application::ports::TtsError;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Fixture {
        dispatcher: SpeechDispatcher,
        none: Arc<RecordingProvider>,
        eleven: Arc<RecordingProvider>,
        kokoro: Arc<RecordingProvider>,
    }

    fn fixture(resolver: VoiceConfigResolver) -> Fixture {
        let none = Arc::new(RecordingProvider::audio(ProviderId::None, b""));
        let eleven = Arc::new(RecordingProvider::audio(ProviderId::ElevenLabs, b"ID3mpeg"));
        let kokoro = Arc::new(RecordingProvider::new(
            ProviderId::Kokoro,
            SpeakOutcome::Service(503),
        ));
        let registry = ProviderRegistry::builder(none.clone())
            .register(eleven.clone())
            .register(kokoro.clone())
            .build();
        Fixture {
            dispatcher: SpeechDispatcher::new(resolver, Arc::new(registry)),
            none,
            eleven,
            kokoro,
        }
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_call() {
        let f = fixture(VoiceConfigResolver::default());

        for text in ["", "   \n"] {
            let result = f
                .dispatcher
                .synthesize(text, PartialVoiceConfig::new(ProviderId::ElevenLabs))
                .await;
            assert!(matches!(result, Err(VoiceError::InvalidInput(_))));
        }
        assert_eq!(f.eleven.speak_calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_speed_rejected() {
        let f = fixture(VoiceConfigResolver::default());

        for speed in [0.0, -1.0, 3.5, f32::INFINITY] {
            let result = f
                .dispatcher
                .synthesize(
                    "Hello",
                    PartialVoiceConfig::new(ProviderId::ElevenLabs).with_speed(speed),
                )
                .await;
            assert!(matches!(result, Err(VoiceError::InvalidInput(_))));
        }
        assert_eq!(f.eleven.speak_calls(), 0);
    }

    #[tokio::test]
    async fn test_returns_audio_unchanged_with_resolved_config() {
        let f = fixture(VoiceConfigResolver::new(Some("global".to_string()), None));

        let audio = f
            .dispatcher
            .synthesize("Hello", PartialVoiceConfig::new(ProviderId::ElevenLabs))
            .await
            .unwrap();

        assert_eq!(audio.data(), b"ID3mpeg");
        assert_eq!(audio.provider(), ProviderId::ElevenLabs);

        let config = f.eleven.last_config().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("global"));
        assert_eq!(config.language, "en-US");
        assert_eq!(config.speed, 1.0);
    }

    #[tokio::test]
    async fn test_none_provider_returns_empty() {
        let f = fixture(VoiceConfigResolver::default());

        let audio = f
            .dispatcher
            .synthesize("Hello", PartialVoiceConfig::new(ProviderId::None))
            .await
            .unwrap();

        assert!(audio.is_empty());
        assert_eq!(f.none.speak_calls(), 1);
        assert_eq!(f.eleven.speak_calls(), 0);
        assert_eq!(f.kokoro.speak_calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_downgraded() {
        let f = fixture(VoiceConfigResolver::default());

        let result = f
            .dispatcher
            .synthesize("Hello", PartialVoiceConfig::new(ProviderId::Kokoro))
            .await;

        match result {
            Err(VoiceError::Provider {
                provider,
                operation,
                status,
                ..
            }) => {
                assert_eq!(provider, ProviderId::Kokoro);
                assert_eq!(operation, "synthesize");
                assert_eq!(status, Some(503));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(f.none.speak_calls(), 0);
    }

    #[tokio::test]
    async fn test_configuration_error_surfaces() {
        let none = Arc::new(RecordingProvider::audio(ProviderId::None, b""));
        let eleven = Arc::new(RecordingProvider::new(
            ProviderId::ElevenLabs,
            SpeakOutcome::Configuration("ElevenLabs API key not configured"),
        ));
        let registry = ProviderRegistry::builder(none.clone()).register(eleven).build();
        let dispatcher = SpeechDispatcher::new(VoiceConfigResolver::default(), Arc::new(registry));

        let result = dispatcher
            .synthesize("Hello", PartialVoiceConfig::new(ProviderId::ElevenLabs))
            .await;

        assert!(matches!(
            result,
            Err(VoiceError::Configuration {
                provider: ProviderId::ElevenLabs,
                ..
            })
        ));
        assert_eq!(none.speak_calls(), 0);
    }

    /// 永不返回的 provider，用于取消测试
    struct HangingProvider;

    #[async_trait]
    impl VoiceProviderPort for HangingProvider {
        fn id(&self) -> ProviderId {
            ProviderId::Discord
        }

        async fn speak(&self, _text: &str, _config: &VoiceConfig) -> Result<AudioResult, TtsError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(AudioResult::new(ProviderId::Discord, b"late".to_vec()))
        }

        async fn list_voices(&self) -> Vec<String> {
            Vec::new()
        }

        async fn release(&self) -> Result<(), TtsError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_cancel_releases_caller() {
        let registry = ProviderRegistry::builder(Arc::new(RecordingProvider::audio(
            ProviderId::None,
            b"",
        )))
        .register(Arc::new(HangingProvider))
        .build();
        let dispatcher = SpeechDispatcher::new(VoiceConfigResolver::default(), Arc::new(registry));

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            dispatcher.synthesize_with_cancel(
                "Hello",
                PartialVoiceConfig::new(ProviderId::Discord),
                &cancel,
            ),
        )
        .await
        .expect("cancellation should release the caller");

        assert!(matches!(
            result,
            Err(VoiceError::Cancelled {
                provider: ProviderId::Discord,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_list_voices_uses_registry() {
        let f = fixture(VoiceConfigResolver::default());
        assert_eq!(
            f.dispatcher.list_voices(ProviderId::ElevenLabs).await,
            vec!["elevenlabs-voice".to_string()]
        );
        assert!(f.dispatcher.health_check(ProviderId::Kokoro).await);
    }
}
