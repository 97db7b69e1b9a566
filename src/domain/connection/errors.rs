//! Connection Context - Errors

use thiserror::Error;

use super::ConnectionKey;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Voice connection not found: {0}")]
    NotFound(ConnectionKey),

    #[error("Voice connection already disconnected: {0}")]
    Disconnected(ConnectionKey),
}
