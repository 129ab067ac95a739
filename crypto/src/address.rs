//! Account addresses.
//!
//! Address format: `nano_` + base32(public key, 52 chars) + base32(checksum, 8 chars)
//!
//! The public key is 256 bits; four zero bits are prepended so it fills 52
//! characters exactly. The checksum is the 40-bit Blake2b of the public key
//! with its bytes reversed.
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).
//!
//! Decoding recognizes the prefix by total length: 65 characters means a
//! five-character prefix (`nano_`), 64 means a four-character one (`xrb_`).

use atto_types::PublicKey;

use crate::error::CryptoError;
use crate::hash::blake2b_40;

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Prefix used when encoding.
pub const DEFAULT_PREFIX: &str = "nano_";
/// Number of base32 characters for the public key (4 pad bits + 256 → 52).
const PUBKEY_CHARS: usize = 52;
/// Number of base32 characters for the checksum (40 bits → 8).
const CHECKSUM_CHARS: usize = 8;
const ENCODED_LEN: usize = PUBKEY_CHARS + CHECKSUM_CHARS;

/// Encode bytes as base32, assuming `pad_bits` zero bits in front of them.
/// `pad_bits + 8 * bytes.len()` must be a multiple of five.
fn encode_base32(bytes: &[u8], pad_bits: u32, out: &mut String) {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = pad_bits;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            out.push(BASE32_ALPHABET[idx] as char);
        }
    }
}

fn base32_value(c: u8) -> Option<u8> {
    match BASE32_DECODE.get(c as usize) {
        Some(&v) if v != 0xFF => Some(v),
        _ => None,
    }
}

/// Decode base32 into exactly `N` bytes after skipping `pad_bits` leading
/// bits, which must be zero. Zero-allocation.
fn decode_base32_fixed<const N: usize>(s: &str, pad_bits: u32) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer: u32 = 0;
    let mut skipped = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let mut val = base32_value(c)? as u64;
        let mut width = 5;
        if skipped < pad_bits {
            let skip = (pad_bits - skipped).min(5);
            if val >> (5 - skip) != 0 {
                return None;
            }
            skipped += skip;
            width -= skip;
            val &= (1 << width) - 1;
        }
        buffer = (buffer << width) | val;
        bits_in_buffer += width;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos == N {
                return None;
            }
            result[pos] = (buffer >> bits_in_buffer) as u8;
            pos += 1;
        }
    }

    if pos < N || bits_in_buffer != 0 {
        return None;
    }
    Some(result)
}

fn checksum(public_key: &[u8; 32]) -> [u8; 5] {
    let mut sum = blake2b_40(public_key);
    sum.reverse();
    sum
}

/// Render a public key as an address under `prefix`.
pub fn encode_address(public_key: &PublicKey, prefix: &str) -> String {
    let mut address = String::with_capacity(prefix.len() + ENCODED_LEN);
    address.push_str(prefix);
    encode_base32(public_key.as_bytes(), 4, &mut address);
    encode_base32(&checksum(public_key.as_bytes()), 0, &mut address);
    address
}

/// Extract the public key from an address, verifying its checksum.
pub fn decode_address(address: &str) -> Result<PublicKey, CryptoError> {
    let prefix_len = match address.len() {
        65 => 5,
        64 => 4,
        other => {
            return Err(CryptoError::address(
                address,
                format!("expected 64 or 65 characters, got {other}"),
            ))
        }
    };
    if !address.is_ascii() {
        return Err(CryptoError::address(address, "non-ASCII characters"));
    }
    if !address[..prefix_len].ends_with('_') {
        return Err(CryptoError::address(address, "missing prefix"));
    }
    let encoded = &address[prefix_len..];
    let (key_part, checksum_part) = encoded.split_at(PUBKEY_CHARS);

    let key: [u8; 32] = decode_base32_fixed(key_part, 4)
        .ok_or_else(|| CryptoError::address(address, "malformed public key"))?;
    let sum: [u8; 5] = decode_base32_fixed(checksum_part, 0)
        .ok_or_else(|| CryptoError::address(address, "malformed checksum"))?;

    if sum != checksum(&key) {
        return Err(CryptoError::address(address, "checksum mismatch"));
    }
    Ok(PublicKey(key))
}

/// Whether an address is well-formed and its checksum is correct.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_ok()
}
