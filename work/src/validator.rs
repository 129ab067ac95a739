//! PoW validation.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};

type Blake2b64 = Blake2b<U8>;

/// `Blake2b-64(nonce_le || subject)` read as a little-endian integer.
pub fn work_value(subject: &[u8; 32], nonce: u64) -> u64 {
    let mut hasher = Blake2b64::new();
    hasher.update(nonce.to_le_bytes());
    hasher.update(subject);
    let mut out = [0u8; 8];
    out.copy_from_slice(&hasher.finalize());
    u64::from_le_bytes(out)
}

/// Validate that a work nonce meets the threshold for a work subject.
pub fn validate_work(subject: &[u8; 32], nonce: u64, threshold: u64) -> bool {
    work_value(subject, nonce) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_depends_on_nonce_and_subject() {
        let subject = [0xAA; 32];
        assert_ne!(work_value(&subject, 1), work_value(&subject, 2));
        assert_ne!(work_value(&subject, 1), work_value(&[0xAB; 32], 1));
    }

    #[test]
    fn threshold_is_inclusive() {
        let subject = [0xAA; 32];
        let nonce = 12345;
        let value = work_value(&subject, nonce);
        assert!(validate_work(&subject, nonce, value));
        assert!(validate_work(&subject, nonce, value.saturating_sub(1)));
        if value < u64::MAX {
            assert!(!validate_work(&subject, nonce, value + 1));
        }
    }

    #[test]
    fn zero_threshold_accepts_anything() {
        assert!(validate_work(&[0u8; 32], 0, 0));
    }
}
