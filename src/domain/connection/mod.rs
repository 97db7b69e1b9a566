//! Connection Context - 语音连接限界上下文
//!
//! 职责:
//! - 按 (guild, channel) 标识的有状态语音资源
//! - 连接状态机

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::VoiceConnection;
pub use errors::ConnectionError;
pub use value_objects::{ConnectionKey, ConnectionStatus};
