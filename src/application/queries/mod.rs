//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：音色与连接的只读视图

mod connection_queries;
mod voice_queries;

pub mod handlers;

pub use connection_queries::*;
pub use voice_queries::*;
