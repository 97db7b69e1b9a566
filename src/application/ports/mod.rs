//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod connection_lifecycle;
mod voice_provider;

#[cfg(test)]
pub(crate) mod mock;

pub use connection_lifecycle::{ConnectionLifecyclePort, LifecycleFailure};
pub use voice_provider::{TtsError, VoiceProviderPort};
