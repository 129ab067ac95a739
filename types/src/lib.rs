//! Fundamental types for the atto block-lattice client.
//!
//! This crate defines the values shared across every other crate in the workspace:
//! keys, signatures, block hashes, link fields and raw amounts with their decimal
//! conversion.

pub mod amount;
pub mod block;
pub mod error;
pub mod keys;

pub use amount::{Raw, Unit};
pub use block::{BlockHash, Link};
pub use error::TypesError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
