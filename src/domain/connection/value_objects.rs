//! Connection Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// 连接键 (guild, channel)，每个键最多一个活跃连接
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionKey {
    pub guild_id: String,
    pub channel_id: String,
}

impl ConnectionKey {
    pub fn new(guild_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

impl fmt::Display for ConnectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.guild_id, self.channel_id)
    }
}

/// 连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    Connected,
    Speaking,
    /// 终态
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "CONNECTED",
            ConnectionStatus::Speaking => "SPEAKING",
            ConnectionStatus::Disconnected => "DISCONNECTED",
        }
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, ConnectionStatus::Disconnected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
