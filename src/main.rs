//! Narrator - 多后端语音合成服务
//!
//! - Domain: voice/, connection/ (Bounded Contexts)
//! - Application: services, commands, queries, ports
//! - Infrastructure: http, memory, adapters

use std::sync::Arc;
use std::time::Duration;

use narrator::application::{ReleaseAllConnections, SpeechDispatcher, VoiceConfigResolver};
use narrator::config::{load_config, print_config};
use narrator::infrastructure::build_registry;
use narrator::infrastructure::http::{AppState, HttpServer};
use narrator::infrastructure::memory::InMemoryConnectionLifecycle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},narrator={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Narrator - 多后端语音合成服务");
    print_config(&config);

    // 注册全部 provider
    let registry = Arc::new(build_registry(&config.tts)?);

    // 连接管理与合成调度
    let lifecycle = InMemoryConnectionLifecycle::new(
        registry.clone(),
        Duration::from_secs(config.tts.release_timeout_secs),
    )
    .arc();
    let dispatcher = Arc::new(SpeechDispatcher::new(
        VoiceConfigResolver::from_config(&config.tts),
        registry.clone(),
    ));

    // 创建 HTTP 服务器
    let server = HttpServer::new(config.server.clone(), AppState::new(dispatcher, lifecycle));
    let state = server.state();

    // 启动服务器（带优雅关闭）
    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 释放全部连接，再关闭各 provider 的持久会话
    match state.release_all_handler.handle(ReleaseAllConnections).await {
        Ok(released) => tracing::info!(released = released, "Voice connections released"),
        Err(e) => tracing::warn!(error = %e, "Some voice connections failed to release"),
    }
    for client in registry.clients() {
        if let Err(e) = client.release().await {
            tracing::warn!(provider = %client.id(), error = %e, "Provider release failed");
        }
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}
