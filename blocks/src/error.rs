use atto_crypto::CryptoError;
use atto_types::TypesError;
use atto_work::WorkError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("malformed block field '{field}': {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("signature is missing")]
    SignatureMissing,

    #[error("work is missing")]
    WorkMissing,

    #[error("invalid block signature")]
    InvalidSignature,

    #[error("private key does not belong to account {0}")]
    KeyMismatch(String),

    #[error("account has not yet been opened")]
    AccountNotOpened,

    #[error("balance {balance} raw is too low to send {amount} raw")]
    InsufficientBalance { balance: String, amount: String },

    #[error("amount '{0}' is not positive")]
    NonPositiveAmount(String),

    #[error("block does not extend the chain: {reason}")]
    NotSuccessor { reason: String },

    /// The node's account summary does not match its own frontier block.
    #[error("the received account info has been manipulated: {reason}")]
    PossibleManipulation { reason: String },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error(transparent)]
    Work(#[from] WorkError),
}

impl BlockError {
    pub(crate) fn malformed(field: &'static str, reason: impl ToString) -> Self {
        Self::MalformedField {
            field,
            reason: reason.to_string(),
        }
    }

    pub fn is_manipulation(&self) -> bool {
        matches!(self, Self::PossibleManipulation { .. })
    }
}
