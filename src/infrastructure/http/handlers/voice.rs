//! Voice HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::{GetVoiceCatalog, ListProviders, ListVoices};
use crate::domain::voice::{CatalogVoice, ProviderId};
use crate::infrastructure::http::dto::{
    ApiResponse, CatalogRequest, ListVoicesRequest, ProviderResponse, VoiceListResponse,
};
use crate::infrastructure::http::state::AppState;

/// 列出 provider 的音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
    Query(req): Query<ListVoicesRequest>,
) -> Json<ApiResponse<VoiceListResponse>> {
    let provider = ProviderId::parse(&req.provider);
    let voices = state.list_voices_handler.handle(ListVoices { provider }).await;

    Json(ApiResponse::success(VoiceListResponse { provider, voices }))
}

/// 列出全部 provider 及其可用状态
pub async fn list_providers(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ProviderResponse>>> {
    let providers = state
        .list_providers_handler
        .handle(ListProviders)
        .await
        .into_iter()
        .map(ProviderResponse::from)
        .collect();

    Json(ApiResponse::success(providers))
}

/// 按语言查询本地音色目录
pub async fn voice_catalog(
    State(state): State<Arc<AppState>>,
    Query(req): Query<CatalogRequest>,
) -> Json<ApiResponse<&'static [CatalogVoice]>> {
    let voices = state.catalog_handler.handle(GetVoiceCatalog {
        language: req.language,
    });
    Json(ApiResponse::success(voices))
}
