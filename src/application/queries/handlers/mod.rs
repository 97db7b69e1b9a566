//! 查询处理器

mod connection_handlers;
mod voice_handlers;

pub use connection_handlers::ListConnectionsHandler;
pub use voice_handlers::{
    GetVoiceCatalogHandler, ListProvidersHandler, ListVoicesHandler, ProviderInfo,
};
