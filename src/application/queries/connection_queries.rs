//! Connection Queries

/// 列出活跃语音连接查询
#[derive(Debug, Clone)]
pub struct ListConnections;
