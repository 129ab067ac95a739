//! Wire JSON of a state block.
//!
//! ```json
//! {
//!   "type": "state",
//!   "account": "nano_...",
//!   "previous": "64 hex",
//!   "representative": "nano_...",
//!   "balance": "decimal raw",
//!   "link": "64 hex",
//!   "signature": "128 uppercase hex",
//!   "work": "16 lowercase hex"
//! }
//! ```
//!
//! The block kind is not part of the JSON; it travels next to it.

use atto_crypto::Account;
use atto_types::{BlockHash, Link, Raw, Signature};
use atto_work::WorkNonce;
use serde::{Deserialize, Serialize};

use crate::error::BlockError;
use crate::state_block::{Block, BlockKind};

const STATE_TYPE: &str = "state";

fn state_type() -> String {
    STATE_TYPE.to_string()
}

/// A block exactly as it appears on the wire. Every field is text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonBlock {
    #[serde(rename = "type", default = "state_type")]
    pub block_type: String,
    pub account: String,
    pub previous: String,
    pub representative: String,
    pub balance: String,
    pub link: String,
    /// Empty until signed.
    #[serde(default)]
    pub signature: String,
    /// Empty until work is attached.
    #[serde(default)]
    pub work: String,
}

impl Block {
    pub fn to_json(&self) -> JsonBlock {
        JsonBlock {
            block_type: state_type(),
            account: self.account().address().to_string(),
            previous: self.previous().to_string(),
            representative: self.representative().address().to_string(),
            balance: self.balance().to_string(),
            link: self.link().to_string(),
            signature: self.signature().map(|s| s.to_string()).unwrap_or_default(),
            work: self.work().map(|w| w.to_string()).unwrap_or_default(),
        }
    }

    /// Parse wire JSON. Every failure names the offending field.
    pub fn from_json(kind: BlockKind, json: &JsonBlock) -> Result<Self, BlockError> {
        if json.block_type != STATE_TYPE {
            return Err(BlockError::malformed(
                "type",
                format!("unsupported block type '{}'", json.block_type),
            ));
        }
        let account =
            Account::from_address(&json.account).map_err(|e| BlockError::malformed("account", e))?;
        let previous =
            BlockHash::from_hex(&json.previous).map_err(|e| BlockError::malformed("previous", e))?;
        let representative = Account::from_address(&json.representative)
            .map_err(|e| BlockError::malformed("representative", e))?;
        let balance: Raw = json
            .balance
            .parse()
            .map_err(|e| BlockError::malformed("balance", e))?;
        let link = Link::from_hex(&json.link).map_err(|e| BlockError::malformed("link", e))?;

        let mut block = Block::new(kind, account, previous, representative, balance, link);
        if !json.signature.is_empty() {
            let signature = Signature::from_hex(&json.signature)
                .map_err(|e| BlockError::malformed("signature", e))?;
            block.set_signature(signature);
        }
        if !json.work.is_empty() {
            let work: WorkNonce = json
                .work
                .parse()
                .map_err(|e| BlockError::malformed("work", e))?;
            block.set_work(work);
        }
        Ok(block)
    }
}
