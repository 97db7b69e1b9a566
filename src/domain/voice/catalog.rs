//! Voice Context - 按语言划分的音色目录

use serde::Serialize;

/// 目录中的一个音色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogVoice {
    pub label: &'static str,
    pub value: &'static str,
}

const fn voice(label: &'static str, value: &'static str) -> CatalogVoice {
    CatalogVoice { label, value }
}

const EN_US: &[CatalogVoice] = &[
    voice("Heart (English)", "af_heart"),
    voice("Soul (English)", "af_soul"),
    voice("Mind (English)", "af_mind"),
    voice("Spirit (English)", "af_spirit"),
];

const PT_BR: &[CatalogVoice] = &[
    voice("Alex (Portuguese)", "pm_alex"),
    voice("Dora (Portuguese)", "pf_dora"),
    voice("Santa (Portuguese)", "pm_santa"),
];

/// 目录覆盖的语言
pub const CATALOG_LANGUAGES: &[&str] = &["en-US", "pt-BR"];

/// 查询某语言下可选的音色，未收录的语言返回空列表
pub fn voices_for_language(language: &str) -> &'static [CatalogVoice] {
    match language {
        "en-US" => EN_US,
        "pt-BR" => PT_BR,
        _ => &[],
    }
}
