//! State blocks for the block-lattice.
//!
//! Each account has its own chain of state blocks. A block carries the full
//! account state after it (representative, balance), so a client only needs
//! the frontier block to know where an account stands. Nothing here keeps a
//! chain: blocks are built from an [`AccountInfo`] cursor, hashed, signed,
//! given work and handed back to the caller.

pub mod error;
pub mod frontier;
pub mod hasher;
pub mod json;
pub mod receivable;
pub mod state_block;
pub mod verifier;

pub use error::BlockError;
pub use frontier::AccountInfo;
pub use hasher::{hash_block, preimage, PREIMAGE_LEN, STATE_BLOCK_PREAMBLE};
pub use json::JsonBlock;
pub use receivable::Receivable;
pub use state_block::{Block, BlockKind};
pub use verifier::{verify_account_info, AccountInfoClaim};
