//! Cryptographic primitives for the atto client.
//!
//! - **Blake2b** for hashing (block hashes, key derivation, address checksums)
//! - **Ed25519 with Blake2b-512** in place of SHA-512, for signing and verification
//! - Address derivation with a network prefix and the ledger's base32 alphabet

pub mod account;
pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use account::Account;
pub use address::{decode_address, encode_address, validate_address, DEFAULT_PREFIX};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, blake2b_512, blake2b_512_multi};
pub use keys::{
    derive_private_key, derive_public_key, generate_seed, keypair_from_seed, parse_seed_hex,
    SEED_LEN,
};
pub use sign::{sign_message, verify_signature};
