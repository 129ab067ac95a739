//! Frontier verification.
//!
//! A node's `account_info` answer is only a claim. It is accepted when the
//! frontier block the node hands out hashes to the claimed frontier, carries
//! a valid signature by the account, and states the same representative and
//! balance. Anything else means the node forged or mixed up data, which is
//! reported as [`BlockError::PossibleManipulation`].

use atto_crypto::Account;
use atto_types::{BlockHash, Raw};
use tracing::warn;

use crate::error::BlockError;
use crate::frontier::AccountInfo;
use crate::state_block::Block;

/// What a node says about an opened account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfoClaim {
    pub frontier: BlockHash,
    pub representative: Account,
    pub balance: Raw,
}

fn manipulation(account: &Account, reason: impl Into<String>) -> BlockError {
    let reason = reason.into();
    warn!(account = %account, %reason, "node returned inconsistent account info");
    BlockError::PossibleManipulation { reason }
}

/// Check `claim` against `frontier_block` and return the verified cursor.
pub fn verify_account_info(
    account: &Account,
    claim: &AccountInfoClaim,
    frontier_block: &Block,
) -> Result<AccountInfo, BlockError> {
    if frontier_block.account().public_key() != account.public_key() {
        return Err(manipulation(account, "frontier block of another account"));
    }
    if frontier_block.hash()? != claim.frontier {
        return Err(manipulation(account, "frontier hash mismatch"));
    }
    match frontier_block.verify_signature_with(account.public_key()) {
        Ok(()) => {}
        Err(BlockError::SignatureMissing) => {
            return Err(manipulation(account, "frontier block is unsigned"))
        }
        Err(BlockError::InvalidSignature) => {
            return Err(manipulation(account, "frontier block signature is invalid"))
        }
        Err(e) => return Err(e),
    }
    if frontier_block.representative().public_key() != claim.representative.public_key() {
        return Err(manipulation(account, "representative mismatch"));
    }
    if frontier_block.balance() != &claim.balance {
        return Err(manipulation(account, "balance mismatch"));
    }

    Ok(AccountInfo {
        account: account.clone(),
        frontier: claim.frontier,
        representative: claim.representative.clone(),
        balance: claim.balance.clone(),
    })
}
