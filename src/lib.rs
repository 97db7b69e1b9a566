//! Narrator - 多后端语音合成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Voice Context: provider 标识、合成配置、provider 配置档、音色目录
//! - Connection Context: 语音频道连接及其状态机
//!
//! 应用层 (application/):
//! - Ports: VoiceProviderPort, ConnectionLifecyclePort
//! - Services: VoiceConfigResolver, ProviderRegistry, SpeechDispatcher
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: ElevenLabs, 本地 TTS, Kokoro, 空实现
//! - Memory: 连接生命周期的内存实现
//! - HTTP: RESTful API

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
