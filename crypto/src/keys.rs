//! Seed handling and Ed25519 key derivation.
//!
//! An account's private key is `Blake2b-256(seed || index)` with the index as
//! four big-endian bytes. The public key follows the Ed25519 recipe with
//! Blake2b-512 standing in for SHA-512 when expanding the private key.

use atto_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;

use crate::error::CryptoError;
use crate::hash::{blake2b_256_multi, blake2b_512};

/// Seeds are exactly 32 bytes.
pub const SEED_LEN: usize = 32;

/// Derive the private key of account `index` under `seed`.
pub fn derive_private_key(seed: &[u8], index: u32) -> Result<PrivateKey, CryptoError> {
    if seed.len() != SEED_LEN {
        return Err(CryptoError::InvalidSeed {
            expected: SEED_LEN,
            actual: seed.len(),
        });
    }
    Ok(PrivateKey(blake2b_256_multi(&[seed, &index.to_be_bytes()])))
}

/// Expand a private key the way signing does: Blake2b-512, then clamp the
/// lower half into a scalar.
pub(crate) fn expand(private_key: &PrivateKey) -> ExpandedSecretKey {
    ExpandedSecretKey::from_bytes(&blake2b_512(private_key.as_bytes()))
}

/// The public key is the clamped scalar times the base point.
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    let expanded = expand(private_key);
    PublicKey(VerifyingKey::from(&expanded).to_bytes())
}

/// Derive both halves of account `index` under `seed`.
pub fn keypair_from_seed(seed: &[u8], index: u32) -> Result<KeyPair, CryptoError> {
    let private = derive_private_key(seed, index)?;
    let public = derive_public_key(&private);
    Ok(KeyPair { public, private })
}

/// A fresh seed from the operating system's random source.
pub fn generate_seed() -> Result<[u8; SEED_LEN], CryptoError> {
    let mut seed = [0u8; SEED_LEN];
    getrandom::getrandom(&mut seed).map_err(|e| CryptoError::Rng(e.to_string()))?;
    Ok(seed)
}

/// Parse a seed given as 64 hex characters. Surrounding whitespace is ignored.
pub fn parse_seed_hex(text: &str) -> Result<[u8; SEED_LEN], CryptoError> {
    let text = text.trim();
    let bytes = hex::decode(text).map_err(|e| {
        CryptoError::Types(atto_types::TypesError::InvalidHex {
            what: "seed",
            reason: e.to_string(),
        })
    })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidSeed {
            expected: SEED_LEN,
            actual: bytes.len(),
        })
}
