//! Memory Layer - In-Memory State Management
//!
//! 实现 ConnectionLifecycle，管理语音连接的内存状态

mod connection_lifecycle;

pub use connection_lifecycle::InMemoryConnectionLifecycle;
