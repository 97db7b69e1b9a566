//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{mask, AppConfig};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 未设置带前缀变量时回退读取的裸环境变量
const ELEVENLABS_KEY_ENV: &str = "ELEVENLABS_API_KEY";
const KOKORO_KEY_ENV: &str = "KOKORO_API_KEY";

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NARRATOR_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NARRATOR_SERVER__PORT=8080`
/// - `NARRATOR_TTS__LOCAL_TTS_URL=http://tts-server:8000`
/// - `NARRATOR_TTS__ELEVENLABS_API_KEY=...`（也接受 `ELEVENLABS_API_KEY`）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5070)?
        .set_default("tts.elevenlabs_url", "https://api.elevenlabs.io")?
        .set_default("tts.kokoro_url", "https://api.kokoro.ai")?
        .set_default("tts.local_tts_url", "http://localhost:8000")?
        .set_default("tts.timeout_secs", 60)?
        .set_default("tts.release_timeout_secs", 5)?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: NARRATOR_TTS__KOKORO_API_KEY=...
    builder = builder.add_source(
        Environment::with_prefix("NARRATOR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    apply_bare_key_env(&mut app_config);
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 兼容只设置了 `ELEVENLABS_API_KEY` / `KOKORO_API_KEY` 的部署；空白 key 视为未设置
fn apply_bare_key_env(config: &mut AppConfig) {
    config.tts.elevenlabs_api_key =
        key_or_env(config.tts.elevenlabs_api_key.take(), ELEVENLABS_KEY_ENV);
    config.tts.kokoro_api_key = key_or_env(config.tts.kokoro_api_key.take(), KOKORO_KEY_ENV);
}

fn key_or_env(key: Option<String>, env: &str) -> Option<String> {
    let non_blank = |k: &String| !k.trim().is_empty();
    key.filter(non_blank)
        .or_else(|| std::env::var(env).ok().filter(non_blank))
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    let urls = [
        ("ElevenLabs", &config.tts.elevenlabs_url),
        ("Kokoro", &config.tts.kokoro_url),
        ("Local TTS", &config.tts.local_tts_url),
    ];
    for (name, url) in urls {
        if url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} URL cannot be empty",
                name
            )));
        }
    }

    if config.tts.timeout_secs == 0 || config.tts.release_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "TTS timeouts must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志），密钥只显示是否已设置
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("ElevenLabs URL: {}", config.tts.elevenlabs_url);
    tracing::info!("ElevenLabs API Key: {}", mask(&config.tts.elevenlabs_api_key));
    tracing::info!("Kokoro URL: {}", config.tts.kokoro_url);
    tracing::info!("Kokoro API Key: {}", mask(&config.tts.kokoro_api_key));
    tracing::info!("Local TTS URL: {}", config.tts.local_tts_url);
    tracing::info!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::info!("Release Timeout: {}s", config.tts.release_timeout_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
