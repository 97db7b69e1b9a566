//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Voice Context: provider、合成配置、合成结果
//! - Connection Context: 每个语音频道的连接状态

pub mod connection;
pub mod voice;
