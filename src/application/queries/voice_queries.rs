//! Voice Queries

use crate::domain::voice::ProviderId;

/// 列出 provider 音色查询
#[derive(Debug, Clone)]
pub struct ListVoices {
    pub provider: ProviderId,
}

/// 列出已注册 provider 查询
#[derive(Debug, Clone)]
pub struct ListProviders;

/// 按语言查询音色目录
#[derive(Debug, Clone)]
pub struct GetVoiceCatalog {
    pub language: String,
}
