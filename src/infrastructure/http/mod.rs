//! HTTP Layer - RESTful API
//!
//! 语音合成、音色查询与连接管理接口

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{build_router, HttpServer};
pub use state::AppState;
