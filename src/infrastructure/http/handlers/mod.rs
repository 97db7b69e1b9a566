//! HTTP Handlers

mod connection;
mod ping;
mod speech;
mod voice;

pub use connection::*;
pub use ping::*;
pub use speech::*;
pub use voice::*;
