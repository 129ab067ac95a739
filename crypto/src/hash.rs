//! Blake2b hashing.
//!
//! Blake2b's output length is a parameter of the hash itself, so a 32-byte
//! Blake2b is not a truncated 64-byte one. The sizes used on the wire are
//! fixed here as distinct types.

use blake2::digest::consts::{U32, U5};
use blake2::{Blake2b, Blake2b512, Digest};

type Blake2b256 = Blake2b<U32>;
type Blake2b40 = Blake2b<U5>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute a 512-bit Blake2b hash of arbitrary data.
pub fn blake2b_512(data: &[u8]) -> [u8; 64] {
    blake2b_512_multi(&[data])
}

pub fn blake2b_512_multi(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// 40-bit Blake2b, used for address checksums.
pub(crate) fn blake2b_40(data: &[u8]) -> [u8; 5] {
    let mut hasher = Blake2b40::new();
    hasher.update(data);
    let mut output = [0u8; 5];
    output.copy_from_slice(&hasher.finalize());
    output
}
