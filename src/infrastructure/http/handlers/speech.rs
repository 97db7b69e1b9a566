//! Speech Handlers
//!
//! 成功时直接返回音频字节；NONE provider 返回空 body

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{SpeakInChannel, SynthesizeSpeech};
use crate::domain::voice::AudioResult;
use crate::infrastructure::http::dto::{SpeakRequest, SynthesizeRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 标明实际产出音频的 provider
pub const VOICE_PROVIDER_HEADER: &str = "x-voice-provider";

/// 合成语音
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesizeRequest>,
) -> Result<Response, ApiError> {
    let command = SynthesizeSpeech {
        text: req.text,
        voice: req.voice.into(),
    };

    let audio = state.synthesize_handler.handle(command).await?;
    audio_response(audio)
}

/// 在语音频道中播报
pub async fn speak(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SpeakRequest>,
) -> Result<Response, ApiError> {
    let command = SpeakInChannel {
        guild_id: req.guild_id,
        channel_id: req.channel_id,
        text: req.text,
        voice: req.voice.into(),
    };

    let audio = state.speak_handler.handle(command).await?;
    audio_response(audio)
}

fn audio_response(audio: AudioResult) -> Result<Response, ApiError> {
    let content_type = audio.content_type().unwrap_or("application/octet-stream");
    let provider = audio.provider().as_str();
    let data = audio.into_bytes();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len())
        .header(VOICE_PROVIDER_HEADER, provider)
        .body(Body::from(data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}
