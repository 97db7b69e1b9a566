//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::ProviderInfo;
use crate::domain::connection::VoiceConnection;
use crate::domain::voice::{PartialVoiceConfig, ProviderId};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Speech DTOs
// ============================================================================

/// 调用方给出的合成配置，未给出的字段由服务端补全
#[derive(Default, Deserialize)]
pub struct VoiceRequest {
    /// provider 标识，大小写不敏感；缺省或无法识别时为 NONE
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub language: Option<String>,
}

impl std::fmt::Debug for VoiceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceRequest")
            .field("provider", &self.provider)
            .field("voice_id", &self.voice_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("speed", &self.speed)
            .field("language", &self.language)
            .finish()
    }
}

impl From<VoiceRequest> for PartialVoiceConfig {
    fn from(req: VoiceRequest) -> Self {
        let provider = req
            .provider
            .as_deref()
            .map(ProviderId::parse)
            .unwrap_or_default();
        PartialVoiceConfig {
            provider,
            voice_id: req.voice_id,
            api_key: req.api_key,
            speed: req.speed,
            language: req.language,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SynthesizeRequest {
    pub text: String,
    #[serde(default)]
    pub voice: VoiceRequest,
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub guild_id: String,
    pub channel_id: String,
    pub text: String,
    #[serde(default)]
    pub voice: VoiceRequest,
}

// ============================================================================
// Voice DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListVoicesRequest {
    pub provider: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceListResponse {
    pub provider: ProviderId,
    pub voices: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogRequest {
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderResponse {
    pub provider: ProviderId,
    pub description: &'static str,
    pub default_language: &'static str,
    pub requires_api_key: bool,
    pub healthy: bool,
}

impl From<ProviderInfo> for ProviderResponse {
    fn from(info: ProviderInfo) -> Self {
        Self {
            provider: info.provider,
            description: info.description,
            default_language: info.default_language,
            requires_api_key: info.requires_api_key,
            healthy: info.healthy,
        }
    }
}

// ============================================================================
// Connection DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ReleaseConnectionRequest {
    pub guild_id: String,
    pub channel_id: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub id: String,
    pub guild_id: String,
    pub channel_id: String,
    pub provider: ProviderId,
    pub status: &'static str,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VoiceConnection> for ConnectionResponse {
    fn from(conn: VoiceConnection) -> Self {
        Self {
            id: conn.id().to_string(),
            guild_id: conn.key().guild_id.clone(),
            channel_id: conn.key().channel_id.clone(),
            provider: conn.provider(),
            status: conn.status().as_str(),
            created_at: conn.created_at().to_rfc3339(),
            updated_at: conn.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub released: bool,
}

#[derive(Debug, Serialize)]
pub struct ReleaseAllResponse {
    pub released: usize,
}
