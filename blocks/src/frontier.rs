//! Account cursor: where an account's chain currently ends.
//!
//! An [`AccountInfo`] is what a client needs to build the next block: the
//! frontier hash, the current representative and balance. Building a block
//! does not move the cursor; [`AccountInfo::apply`] returns the cursor after
//! a block, so several blocks can be chained without asking the node again.

use atto_crypto::Account;
use atto_types::amount::apply_receive;
use atto_types::{BlockHash, Link, Raw, Unit};
use tracing::debug;

use crate::error::BlockError;
use crate::receivable::Receivable;
use crate::state_block::{Block, BlockKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfo {
    pub account: Account,
    /// Zero while the account has no blocks.
    pub frontier: BlockHash,
    pub representative: Account,
    pub balance: Raw,
}

impl AccountInfo {
    /// An account without a chain. Its first block will delegate to
    /// `representative`.
    pub fn unopened(account: Account, representative: Account) -> Self {
        Self {
            account,
            frontier: BlockHash::ZERO,
            representative,
            balance: Raw::zero(),
        }
    }

    pub fn is_opened(&self) -> bool {
        !self.frontier.is_zero()
    }

    fn block(
        &self,
        kind: BlockKind,
        representative: Account,
        balance: Raw,
        link: Link,
    ) -> Result<Block, BlockError> {
        let block = Block::new(
            kind,
            self.account.clone(),
            self.frontier,
            representative,
            balance,
            link,
        );
        let hash = block.hash()?;
        debug!(%kind, account = %self.account, hash = %hash, "built block");
        Ok(block)
    }

    /// A send of `amount` (decimal text in `unit`) to `recipient`. The block
    /// is hashed but has neither signature nor work.
    pub fn send(
        &self,
        unit: &Unit,
        amount: &str,
        recipient: &Account,
    ) -> Result<Block, BlockError> {
        if !self.is_opened() {
            return Err(BlockError::AccountNotOpened);
        }
        let balance = unit.apply_send(&self.balance, amount)?;
        if balance.is_negative() {
            return Err(BlockError::InsufficientBalance {
                balance: self.balance.to_string(),
                amount: unit.decimal_to_raw(amount)?.to_string(),
            });
        }
        self.block(
            BlockKind::Send,
            self.representative.clone(),
            balance,
            Link::from_public_key(recipient.public_key()),
        )
    }

    /// Receive `receivable`. Opens the account if it has no chain yet.
    pub fn receive(&self, receivable: &Receivable) -> Result<Block, BlockError> {
        if !receivable.amount.is_positive() {
            return Err(BlockError::NonPositiveAmount(receivable.amount.to_string()));
        }
        let kind = if self.is_opened() {
            BlockKind::Receive
        } else {
            BlockKind::Open
        };
        self.block(
            kind,
            self.representative.clone(),
            apply_receive(&self.balance, &receivable.amount),
            Link::from_block_hash(&receivable.source_hash),
        )
    }

    /// Delegate to `representative` from now on.
    pub fn change(&self, representative: Account) -> Result<Block, BlockError> {
        if !self.is_opened() {
            return Err(BlockError::AccountNotOpened);
        }
        self.block(
            BlockKind::Change,
            representative,
            self.balance.clone(),
            Link::ZERO,
        )
    }

    /// The cursor after `block`, which must extend this account's chain.
    pub fn apply(&self, block: &Block) -> Result<AccountInfo, BlockError> {
        if block.account().public_key() != self.account.public_key() {
            return Err(BlockError::NotSuccessor {
                reason: format!("block belongs to {}", block.account()),
            });
        }
        if *block.previous() != self.frontier {
            return Err(BlockError::NotSuccessor {
                reason: format!(
                    "block follows {} but the frontier is {}",
                    block.previous(),
                    self.frontier
                ),
            });
        }
        Ok(AccountInfo {
            account: self.account.clone(),
            frontier: block.hash()?,
            representative: block.representative().clone(),
            balance: block.balance().clone(),
        })
    }
}
