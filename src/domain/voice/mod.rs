//! Voice Context - 语音合成限界上下文
//!
//! 职责:
//! - Provider 标识与静态配置档
//! - 合成配置与合成结果
//! - 按语言的音色目录

mod catalog;
mod profile;
mod value_objects;

pub use catalog::{voices_for_language, CatalogVoice, CATALOG_LANGUAGES};
pub use profile::ProviderProfile;
pub use value_objects::{
    AudioResult, PartialVoiceConfig, ProviderId, VoiceConfig, MAX_SPEED, MIN_SPEED,
};
