//! 命令处理器

mod connection_handlers;
mod speech_handlers;

pub use connection_handlers::{ReleaseAllConnectionsHandler, ReleaseConnectionHandler};
pub use speech_handlers::{SpeakInChannelHandler, SynthesizeSpeechHandler};
