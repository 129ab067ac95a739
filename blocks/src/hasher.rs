//! Canonical block hashing.
//!
//! Preimage layout (176 bytes):
//!
//! | bytes     | contents                                 |
//! |-----------|------------------------------------------|
//! | 0..31     | zero                                     |
//! | 31        | state block preamble (`6`)               |
//! | 32..64    | account public key                       |
//! | 64..96    | previous block hash (zero for the first) |
//! | 96..128   | representative public key                |
//! | 128..144  | balance, 16-byte big-endian              |
//! | 144..176  | link                                     |
//!
//! The block hash is Blake2b-256 of the preimage.

use atto_crypto::blake2b_256;
use atto_types::BlockHash;

use crate::error::BlockError;
use crate::state_block::Block;

pub const STATE_BLOCK_PREAMBLE: u8 = 6;
pub const PREIMAGE_LEN: usize = 176;

/// Build the hashing preimage. Fails if the balance is negative or does not
/// fit in 16 bytes.
pub fn preimage(block: &Block) -> Result<[u8; PREIMAGE_LEN], BlockError> {
    let balance = block.balance().to_be_bytes16().ok_or_else(|| {
        BlockError::malformed(
            "balance",
            format!("{} does not fit in 128 unsigned bits", block.balance()),
        )
    })?;

    let mut msg = [0u8; PREIMAGE_LEN];
    msg[31] = STATE_BLOCK_PREAMBLE;
    msg[32..64].copy_from_slice(block.account().public_key().as_bytes());
    msg[64..96].copy_from_slice(block.previous().as_bytes());
    msg[96..128].copy_from_slice(block.representative().public_key().as_bytes());
    msg[128..144].copy_from_slice(&balance);
    msg[144..176].copy_from_slice(block.link().as_bytes());
    Ok(msg)
}

/// Hash a block's contents. Signature and work are not covered.
pub fn hash_block(block: &Block) -> Result<BlockHash, BlockError> {
    Ok(BlockHash::new(blake2b_256(&preimage(block)?)))
}
