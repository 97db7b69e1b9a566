//! Voice Query Handlers

use std::sync::Arc;

use crate::application::queries::{GetVoiceCatalog, ListProviders, ListVoices};
use crate::application::services::SpeechDispatcher;
use crate::domain::voice::{voices_for_language, CatalogVoice, ProviderId};

// ============================================================================
// Response DTOs
// ============================================================================

/// Provider 信息
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub provider: ProviderId,
    pub description: &'static str,
    pub default_language: &'static str,
    pub requires_api_key: bool,
    pub healthy: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
pub struct ListVoicesHandler {
    dispatcher: Arc<SpeechDispatcher>,
}

impl ListVoicesHandler {
    pub fn new(dispatcher: Arc<SpeechDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, query: ListVoices) -> Vec<String> {
        self.dispatcher.list_voices(query.provider).await
    }
}

/// ListProviders Handler
pub struct ListProvidersHandler {
    dispatcher: Arc<SpeechDispatcher>,
}

impl ListProvidersHandler {
    pub fn new(dispatcher: Arc<SpeechDispatcher>) -> Self {
        Self { dispatcher }
    }

    pub async fn handle(&self, _query: ListProviders) -> Vec<ProviderInfo> {
        let mut providers = Vec::new();
        for id in self.dispatcher.registry().providers() {
            let profile = id.profile();
            providers.push(ProviderInfo {
                provider: id,
                description: profile.description,
                default_language: profile.default_language,
                requires_api_key: profile.requires_api_key,
                healthy: self.dispatcher.health_check(id).await,
            });
        }
        providers
    }
}

/// GetVoiceCatalog Handler
#[derive(Default)]
pub struct GetVoiceCatalogHandler;

impl GetVoiceCatalogHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: GetVoiceCatalog) -> &'static [CatalogVoice] {
        voices_for_language(&query.language)
    }
}
