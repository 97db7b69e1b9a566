//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（VoiceProviderPort、ConnectionLifecyclePort）
//! - services: 配置补全、provider 注册表、合成调度器
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;

// Re-exports
pub use commands::{
    handlers::{
        ReleaseAllConnectionsHandler, ReleaseConnectionHandler, SpeakInChannelHandler,
        SynthesizeSpeechHandler,
    },
    ReleaseAllConnections, ReleaseConnection, SpeakInChannel, SynthesizeSpeech,
};

pub use error::VoiceError;

pub use ports::{ConnectionLifecyclePort, LifecycleFailure, TtsError, VoiceProviderPort};

pub use queries::{
    handlers::{
        GetVoiceCatalogHandler, ListConnectionsHandler, ListProvidersHandler, ListVoicesHandler,
        ProviderInfo,
    },
    GetVoiceCatalog, ListConnections, ListProviders, ListVoices,
};

pub use services::{ProviderRegistry, SpeechDispatcher, VoiceConfigResolver};
