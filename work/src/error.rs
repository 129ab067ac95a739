use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkError {
    #[error("work hasher failed: {0}")]
    Hasher(String),

    #[error("could not start work threads: {0}")]
    WorkerPool(String),

    #[error("invalid work nonce '{0}': expected 16 hex characters")]
    InvalidNonce(String),

    #[error("work generation ended without a result")]
    Cancelled,
}
