//! 测试用的进程内 TTS 后端，记录收到的请求

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// 收到的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
    delay: Duration,
}

struct BackendState {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl FakeBackend {
    /// 对任意请求返回固定音频
    pub async fn audio(body: &[u8], content_type: &'static str) -> Self {
        Self::spawn(Reply {
            status: StatusCode::OK,
            content_type,
            body: body.to_vec(),
            delay: Duration::ZERO,
        })
        .await
    }

    /// 返回错误状态码
    pub async fn failing(status: u16, body: &str) -> Self {
        Self::spawn(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
            delay: Duration::ZERO,
        })
        .await
    }

    /// 延迟后返回固定音频
    pub async fn slow(body: &[u8], content_type: &'static str, delay: Duration) -> Self {
        Self::spawn(Reply {
            status: StatusCode::OK,
            content_type,
            body: body.to_vec(),
            delay,
        })
        .await
    }

    async fn spawn(reply: Reply) -> Self {
        let state = Arc::new(BackendState {
            reply,
            requests: Mutex::new(Vec::new()),
        });
        let router = Router::new().fallback(record).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let reply = &state.reply;
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    (
        reply.status,
        [(axum::http::header::CONTENT_TYPE, reply.content_type)],
        reply.body.clone(),
    )
        .into_response()
}
