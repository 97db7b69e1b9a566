//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：语音合成与连接释放

mod connection_commands;
mod speech_commands;

pub mod handlers;

pub use connection_commands::*;
pub use speech_commands::*;
