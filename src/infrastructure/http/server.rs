//! HTTP Server
//!
//! 装配路由与中间件，监听直到收到关闭信号

use std::future::Future;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware::request_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// 请求体上限，合成文本不需要更大
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 完整的 Router：全部路由、请求体上限与日志中间件
pub fn build_router(state: Arc<AppState>) -> Router {
    create_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 共享的应用状态，关闭时用于释放连接
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// 监听直到 `shutdown` 完成，进行中的请求处理完后返回
    pub async fn serve<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(
            addr = %addr,
            providers = ?self.state.providers,
            "Narrator HTTP server listening"
        );

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::state::test_state;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = build_router(Arc::new(test_state()));
        let text = "a".repeat(MAX_BODY_BYTES + 1);
        let body = serde_json::json!({ "text": text }).to_string();

        let request = Request::builder()
            .method("POST")
            .uri("/api/speech/synthesize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let server = HttpServer::new(
            ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            test_state(),
        );

        server.serve(async {}).await.unwrap();
    }
}
