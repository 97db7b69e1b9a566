//! 测试用 provider，记录调用次数

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::{TtsError, VoiceProviderPort};
use crate::domain::voice::{AudioResult, ProviderId, VoiceConfig};

/// speak 的预设结果
pub enum SpeakOutcome {
    Audio(Vec<u8>),
    /// 延迟后返回音频
    Delayed(Vec<u8>, Duration),
    Configuration(&'static str),
    Service(u16),
}

pub struct RecordingProvider {
    id: ProviderId,
    outcome: SpeakOutcome,
    fail_release: bool,
    speak_calls: AtomicUsize,
    release_calls: AtomicUsize,
    last_config: Mutex<Option<VoiceConfig>>,
}

impl RecordingProvider {
    pub fn new(id: ProviderId, outcome: SpeakOutcome) -> Self {
        Self {
            id,
            outcome,
            fail_release: false,
            speak_calls: AtomicUsize::new(0),
            release_calls: AtomicUsize::new(0),
            last_config: Mutex::new(None),
        }
    }

    pub fn audio(id: ProviderId, data: &[u8]) -> Self {
        Self::new(id, SpeakOutcome::Audio(data.to_vec()))
    }

    pub fn failing_release(mut self) -> Self {
        self.fail_release = true;
        self
    }

    pub fn speak_calls(&self) -> usize {
        self.speak_calls.load(Ordering::SeqCst)
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<VoiceConfig> {
        self.last_config.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoiceProviderPort for RecordingProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn speak(&self, _text: &str, config: &VoiceConfig) -> Result<AudioResult, TtsError> {
        self.speak_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() = Some(config.clone());
        match &self.outcome {
            SpeakOutcome::Audio(data) => Ok(AudioResult::new(self.id, data.clone())),
            SpeakOutcome::Delayed(data, delay) => {
                tokio::time::sleep(*delay).await;
                Ok(AudioResult::new(self.id, data.clone()))
            }
            SpeakOutcome::Configuration(msg) => Err(TtsError::configuration(*msg)),
            SpeakOutcome::Service(status) => Err(TtsError::ServiceError {
                status: *status,
                body: "backend failure".to_string(),
            }),
        }
    }

    async fn list_voices(&self) -> Vec<String> {
        vec![format!("{}-voice", self.id.as_str().to_lowercase())]
    }

    async fn release(&self) -> Result<(), TtsError> {
        self.release_calls.fetch_add(1, Ordering::SeqCst);
        // 让并发的释放请求有机会交错
        tokio::task::yield_now().await;
        if self.fail_release {
            return Err(TtsError::NetworkError("session stuck".to_string()));
        }
        Ok(())
    }
}
