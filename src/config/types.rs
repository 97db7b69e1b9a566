//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 后端配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 后端配置
///
/// 进程级密钥只在启动时读取一次，之后显式传递给解析器和各 provider
#[derive(Clone, Deserialize)]
pub struct TtsConfig {
    /// 进程级 ElevenLabs API key
    #[serde(default)]
    pub elevenlabs_api_key: Option<String>,

    /// 进程级 Kokoro API key
    #[serde(default)]
    pub kokoro_api_key: Option<String>,

    /// ElevenLabs 服务基础 URL
    #[serde(default = "default_elevenlabs_url")]
    pub elevenlabs_url: String,

    /// Kokoro 服务基础 URL
    #[serde(default = "default_kokoro_url")]
    pub kokoro_url: String,

    /// 本地 TTS 服务基础 URL
    #[serde(default = "default_local_tts_url")]
    pub local_tts_url: String,

    /// 云端请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 释放会话时等待进行中请求的最长时间（秒）
    #[serde(default = "default_release_timeout")]
    pub release_timeout_secs: u64,
}

fn default_elevenlabs_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_kokoro_url() -> String {
    "https://api.kokoro.ai".to_string()
}

fn default_local_tts_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tts_timeout() -> u64 {
    60
}

fn default_release_timeout() -> u64 {
    5
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            elevenlabs_api_key: None,
            kokoro_api_key: None,
            elevenlabs_url: default_elevenlabs_url(),
            kokoro_url: default_kokoro_url(),
            local_tts_url: default_local_tts_url(),
            timeout_secs: default_tts_timeout(),
            release_timeout_secs: default_release_timeout(),
        }
    }
}

impl std::fmt::Debug for TtsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsConfig")
            .field("elevenlabs_api_key", &mask(&self.elevenlabs_api_key))
            .field("kokoro_api_key", &mask(&self.kokoro_api_key))
            .field("elevenlabs_url", &self.elevenlabs_url)
            .field("kokoro_url", &self.kokoro_url)
            .field("local_tts_url", &self.local_tts_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("release_timeout_secs", &self.release_timeout_secs)
            .finish()
    }
}

/// 密钥脱敏显示
pub fn mask(secret: &Option<String>) -> &'static str {
    match secret {
        Some(_) => "<set>",
        None => "<unset>",
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
