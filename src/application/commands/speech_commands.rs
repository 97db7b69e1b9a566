//! Speech Commands

use crate::domain::voice::PartialVoiceConfig;

/// 合成语音命令
#[derive(Debug, Clone)]
pub struct SynthesizeSpeech {
    pub text: String,
    pub voice: PartialVoiceConfig,
}

/// 在语音频道中播报命令
#[derive(Debug, Clone)]
pub struct SpeakInChannel {
    pub guild_id: String,
    pub channel_id: String,
    pub text: String,
    pub voice: PartialVoiceConfig,
}
