//! Ping Handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::voice::ProviderId;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 已注册的 provider，不做可用性探测（见 /api/voice/providers）
    pub providers: Vec<ProviderId>,
}

/// 存活检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        providers: state.providers.clone(),
    })
}
