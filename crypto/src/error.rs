use atto_types::TypesError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("seed must be {expected} bytes, got {actual}")]
    InvalidSeed { expected: usize, actual: usize },

    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("public key is not a valid curve point")]
    InvalidPublicKey,

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("random number generator failed: {0}")]
    Rng(String),
}

impl CryptoError {
    pub(crate) fn address(address: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}
