//! Connection Commands

/// 释放单个语音连接命令
#[derive(Debug, Clone)]
pub struct ReleaseConnection {
    pub guild_id: String,
    pub channel_id: String,
}

/// 释放全部语音连接命令
#[derive(Debug, Clone)]
pub struct ReleaseAllConnections;
