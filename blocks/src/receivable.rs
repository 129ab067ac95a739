use atto_types::{BlockHash, Raw};

/// An incoming transfer that has not been received yet.
///
/// Consumed once, by a receive (or open) block whose link is `source_hash`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receivable {
    /// Hash of the send block on the sender's chain.
    pub source_hash: BlockHash,
    pub amount: Raw,
    /// Address of the sending account.
    pub source: String,
}
