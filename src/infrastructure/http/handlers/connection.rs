//! Connection HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListConnections, ReleaseAllConnections, ReleaseConnection};
use crate::infrastructure::http::dto::{
    ApiResponse, ConnectionResponse, ReleaseAllResponse, ReleaseConnectionRequest, ReleaseResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出活跃连接
pub async fn list_connections(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<ConnectionResponse>>> {
    let connections = state
        .list_connections_handler
        .handle(ListConnections)
        .await
        .into_iter()
        .map(ConnectionResponse::from)
        .collect();

    Json(ApiResponse::success(connections))
}

/// 释放单个连接
pub async fn release_connection(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReleaseConnectionRequest>,
) -> Result<Json<ApiResponse<ReleaseResponse>>, ApiError> {
    let released = state
        .release_connection_handler
        .handle(ReleaseConnection {
            guild_id: req.guild_id,
            channel_id: req.channel_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(ReleaseResponse { released })))
}

/// 释放全部连接
pub async fn release_all_connections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<ReleaseAllResponse>>, ApiError> {
    let released = state
        .release_all_handler
        .handle(ReleaseAllConnections)
        .await?;

    Ok(Json(ApiResponse::success(ReleaseAllResponse { released })))
}
