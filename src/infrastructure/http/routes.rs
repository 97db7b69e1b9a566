//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                    GET   健康检查
//! - /api/speech/synthesize       POST  合成语音，返回音频字节
//! - /api/speech/speak            POST  在语音频道中播报，返回音频字节
//! - /api/voice/list              GET   列出 provider 的音色 (?provider=)
//! - /api/voice/providers         GET   列出全部 provider
//! - /api/voice/catalog           GET   按语言查询音色目录 (?language=)
//! - /api/connection/list         GET   列出活跃连接
//! - /api/connection/release      POST  释放连接
//! - /api/connection/release_all  POST  释放全部连接

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/speech", speech_routes())
        .nest("/voice", voice_routes())
        .nest("/connection", connection_routes())
}

/// Speech 路由
fn speech_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/synthesize", post(handlers::synthesize))
        .route("/speak", post(handlers::speak))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voices))
        .route("/providers", get(handlers::list_providers))
        .route("/catalog", get(handlers::voice_catalog))
}

/// Connection 路由
fn connection_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_connections))
        .route("/release", post(handlers::release_connection))
        .route("/release_all", post(handlers::release_all_connections))
}
