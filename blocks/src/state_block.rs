//! State block: the single block format of the block-lattice.
//!
//! Every block contains the full account state after the operation. The kind
//! (send, receive, change, open) is not part of the hashed contents; it only
//! decides the PoW threshold and the subtype a block is submitted with.

use std::fmt;
use std::sync::OnceLock;

use atto_crypto::{derive_public_key, sign_message, verify_signature, Account};
use atto_types::{BlockHash, Link, PrivateKey, PublicKey, Raw, Signature};
use atto_work::{validate_work, WorkBlockKind, WorkGenerator, WorkNonce, WorkThresholds};
use tracing::debug;

use crate::error::BlockError;
use crate::hasher::hash_block;

/// The operation a block represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Lowers the balance; link is the recipient's public key.
    Send,
    /// Raises the balance; link is the source send block's hash.
    Receive,
    /// Changes the representative; link is zero.
    Change,
    /// First block of a chain, receiving its first transfer.
    Open,
}

impl BlockKind {
    /// Subtype for the `process` call. Open blocks are receives.
    pub fn subtype(&self) -> &'static str {
        match self {
            BlockKind::Send => "send",
            BlockKind::Receive | BlockKind::Open => "receive",
            BlockKind::Change => "change",
        }
    }

    /// Map a node-reported subtype back to a kind.
    pub fn from_subtype(subtype: &str) -> Option<Self> {
        match subtype {
            "send" => Some(BlockKind::Send),
            "receive" => Some(BlockKind::Receive),
            "change" => Some(BlockKind::Change),
            "open" => Some(BlockKind::Open),
            _ => None,
        }
    }

    /// Which PoW threshold applies. Only receives into an opened account get
    /// the lower one.
    pub fn work_kind(&self) -> WorkBlockKind {
        match self {
            BlockKind::Receive => WorkBlockKind::Receive,
            BlockKind::Send | BlockKind::Change | BlockKind::Open => WorkBlockKind::Base,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Send => "send",
            BlockKind::Receive => "receive",
            BlockKind::Change => "change",
            BlockKind::Open => "open",
        };
        f.write_str(name)
    }
}

/// A state block.
///
/// The hash covers account, previous, representative, balance and link. It
/// is computed on first use and cached; setters of hashed fields drop the
/// cache and the now stale signature.
#[derive(Clone, Debug)]
pub struct Block {
    kind: BlockKind,
    account: Account,
    previous: BlockHash,
    representative: Account,
    balance: Raw,
    link: Link,
    signature: Option<Signature>,
    work: Option<WorkNonce>,
    hash: OnceLock<BlockHash>,
}

impl Block {
    pub fn new(
        kind: BlockKind,
        account: Account,
        previous: BlockHash,
        representative: Account,
        balance: Raw,
        link: Link,
    ) -> Self {
        Self {
            kind,
            account,
            previous,
            representative,
            balance,
            link,
            signature: None,
            work: None,
            hash: OnceLock::new(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn previous(&self) -> &BlockHash {
        &self.previous
    }

    pub fn representative(&self) -> &Account {
        &self.representative
    }

    pub fn balance(&self) -> &Raw {
        &self.balance
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn work(&self) -> Option<WorkNonce> {
        self.work
    }

    /// Whether this is the first block of its account's chain.
    pub fn is_first(&self) -> bool {
        self.previous.is_zero()
    }

    pub fn set_kind(&mut self, kind: BlockKind) {
        self.kind = kind;
    }

    pub fn set_account(&mut self, account: Account) {
        self.account = account;
        self.work = None;
        self.invalidate();
    }

    pub fn set_previous(&mut self, previous: BlockHash) {
        self.previous = previous;
        self.work = None;
        self.invalidate();
    }

    pub fn set_representative(&mut self, representative: Account) {
        self.representative = representative;
        self.invalidate();
    }

    pub fn set_balance(&mut self, balance: Raw) {
        self.balance = balance;
        self.invalidate();
    }

    pub fn set_link(&mut self, link: Link) {
        self.link = link;
        self.invalidate();
    }

    /// Attach a signature produced elsewhere. Not checked here.
    pub fn set_signature(&mut self, signature: Signature) {
        self.signature = Some(signature);
    }

    pub fn set_work(&mut self, work: WorkNonce) {
        self.work = Some(work);
    }

    fn invalidate(&mut self) {
        self.hash = OnceLock::new();
        self.signature = None;
    }

    /// The block hash, computed once per set of hashed fields.
    pub fn hash(&self) -> Result<BlockHash, BlockError> {
        if let Some(hash) = self.hash.get() {
            return Ok(*hash);
        }
        let hash = hash_block(self)?;
        let _ = self.hash.set(hash);
        Ok(hash)
    }

    /// Sign the block hash with the account's private key.
    pub fn sign(&mut self, private_key: &PrivateKey) -> Result<(), BlockError> {
        let public_key = derive_public_key(private_key);
        if public_key != *self.account.public_key() {
            return Err(BlockError::KeyMismatch(self.account.address().to_string()));
        }
        let hash = self.hash()?;
        let signature = sign_message(private_key, &public_key, hash.as_bytes())?;
        self.signature = Some(signature);
        Ok(())
    }

    /// Check the signature against `public_key`.
    pub fn verify_signature_with(&self, public_key: &PublicKey) -> Result<(), BlockError> {
        let signature = self.signature.as_ref().ok_or(BlockError::SignatureMissing)?;
        let hash = self.hash()?;
        if verify_signature(public_key, hash.as_bytes(), signature) {
            Ok(())
        } else {
            Err(BlockError::InvalidSignature)
        }
    }

    /// Check the signature against the block's own account.
    pub fn verify_signature(&self) -> Result<(), BlockError> {
        self.verify_signature_with(self.account.public_key())
    }

    /// What the PoW nonce is computed over: the previous hash, or the
    /// account's public key for the first block of a chain.
    pub fn work_subject(&self) -> [u8; 32] {
        if self.previous.is_zero() {
            *self.account.public_key().as_bytes()
        } else {
            *self.previous.as_bytes()
        }
    }

    pub fn work_threshold(&self, thresholds: &WorkThresholds) -> u64 {
        thresholds.threshold_for(self.kind.work_kind())
    }

    /// Compute work locally and attach it.
    pub fn generate_work(
        &mut self,
        generator: &WorkGenerator,
        thresholds: &WorkThresholds,
    ) -> Result<WorkNonce, BlockError> {
        let threshold = self.work_threshold(thresholds);
        debug!(kind = %self.kind, account = %self.account, "generating work");
        let nonce = generator.generate(&self.work_subject(), threshold)?;
        self.work = Some(nonce);
        Ok(nonce)
    }

    /// Whether the attached work meets the threshold for this block's kind.
    pub fn has_valid_work(&self, thresholds: &WorkThresholds) -> bool {
        self.work.is_some_and(|nonce| {
            validate_work(&self.work_subject(), nonce.0, self.work_threshold(thresholds))
        })
    }

    /// A block can only be submitted with both work and signature.
    pub fn ensure_complete(&self) -> Result<(), BlockError> {
        if self.work.is_none() {
            return Err(BlockError::WorkMissing);
        }
        if self.signature.is_none() {
            return Err(BlockError::SignatureMissing);
        }
        Ok(())
    }
}

/// Equality over contents; the hash cache is ignored.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.account == other.account
            && self.previous == other.previous
            && self.representative == other.representative
            && self.balance == other.balance
            && self.link == other.link
            && self.signature == other.signature
            && self.work == other.work
    }
}

impl Eq for Block {}
