use atto_blocks::BlockError;
use atto_crypto::CryptoError;
use atto_rpc::{RpcError, TransportError};
use atto_types::TypesError;
use atto_work::WorkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Work(#[from] WorkError),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The node returned a nonce that does not meet the threshold.
    #[error("node returned work {nonce} below threshold {threshold:016x}")]
    InsufficientWork { nonce: String, threshold: u64 },

    #[error("work task failed: {0}")]
    WorkTask(String),
}

impl WalletError {
    /// Whether a node answer failed frontier verification.
    pub fn is_manipulation(&self) -> bool {
        match self {
            WalletError::Rpc(e) => e.is_manipulation(),
            WalletError::Block(e) => e.is_manipulation(),
            _ => false,
        }
    }
}
