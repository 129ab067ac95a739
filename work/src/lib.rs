//! Anti-spam proof-of-work.
//!
//! Not mining: a nonce is valid when the 64-bit Blake2b of the nonce and the
//! block's work subject, read little-endian, reaches a fixed threshold. The
//! subject is the previous block hash, or the account's public key for the
//! first block of a chain.

pub mod error;
pub mod generator;
pub mod thresholds;
pub mod validator;

use std::fmt;
use std::str::FromStr;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use thresholds::{WorkBlockKind, WorkThresholds};
pub use validator::{validate_work, work_value};

/// The result of PoW generation.
///
/// Travels as 16 lowercase hex characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorkNonce(pub u64);

impl fmt::Display for WorkNonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for WorkNonce {
    type Err = WorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WorkError::InvalidNonce(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(WorkNonce)
            .map_err(|_| WorkError::InvalidNonce(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_text_is_zero_padded_lowercase() {
        assert_eq!(WorkNonce(0xAB).to_string(), "00000000000000ab");
        assert_eq!(WorkNonce(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn nonce_parse_accepts_either_case() {
        assert_eq!("7202DF8A7C380578".parse::<WorkNonce>().unwrap(), WorkNonce(0x7202df8a7c380578));
        assert_eq!("7202df8a7c380578".parse::<WorkNonce>().unwrap(), WorkNonce(0x7202df8a7c380578));
    }

    #[test]
    fn nonce_parse_is_strict() {
        for bad in ["", "ab", "+202df8a7c380578", "7202df8a7c38057g", "07202df8a7c380578"] {
            assert!(bad.parse::<WorkNonce>().is_err(), "{bad:?} accepted");
        }
    }
}
