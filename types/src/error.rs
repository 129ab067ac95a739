//! Parse errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid hex for {what}: {reason}")]
    InvalidHex { what: &'static str, reason: String },

    #[error("invalid amount: '{0}'")]
    InvalidAmount(String),
}

impl TypesError {
    pub(crate) fn hex(what: &'static str, reason: impl ToString) -> Self {
        Self::InvalidHex {
            what,
            reason: reason.to_string(),
        }
    }
}

/// Decode exactly `N` bytes from a hex string (either case).
pub(crate) fn decode_hex_array<const N: usize>(
    what: &'static str,
    s: &str,
) -> Result<[u8; N], TypesError> {
    if s.len() != N * 2 {
        return Err(TypesError::hex(
            what,
            format!("expected {} hex characters, got {}", N * 2, s.len()),
        ));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out).map_err(|e| TypesError::hex(what, e))?;
    Ok(out)
}
