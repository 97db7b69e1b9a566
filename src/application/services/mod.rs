//! 应用层 - 语音合成服务
//!
//! - config_resolver: 合成配置补全
//! - registry: provider 注册表
//! - dispatcher: 合成门面

mod config_resolver;
mod dispatcher;
mod registry;

pub use config_resolver::VoiceConfigResolver;
pub use dispatcher::{PreparedSpeech, SpeechDispatcher};
pub use registry::{ProviderRegistry, ProviderRegistryBuilder};
