//! RPC error types.

use atto_blocks::BlockError;
use atto_crypto::CryptoError;
use atto_work::WorkError;
use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid JSON from node: {0}")]
    Json(#[from] serde_json::Error),

    /// The node answered with an `"error"` field.
    #[error("node error on {action}: {message}")]
    Node { action: &'static str, message: String },

    #[error("unexpected {action} response: {reason}")]
    UnexpectedResponse { action: &'static str, reason: String },

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Work(#[from] WorkError),
}

impl RpcError {
    /// Whether the node's data failed frontier verification.
    pub fn is_manipulation(&self) -> bool {
        matches!(self, RpcError::Block(e) if e.is_manipulation())
    }
}
