//! Ed25519 signing and verification with Blake2b-512 as the hash.
//!
//! Signing follows RFC 8032 with SHA-512 replaced by Blake2b-512 at every
//! step. Verification follows the ZIP 215 rules: `S` must be canonical, the
//! encodings of `A` and `R` need not be, and the check is cofactored
//! (`[8](R - ([S]B - [k]A))` must be the identity).

use atto_types::{PrivateKey, PublicKey, Signature};
use blake2::Blake2b512;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use curve25519_dalek::traits::IsIdentity;
use ed25519_dalek::hazmat::raw_sign;
use ed25519_dalek::VerifyingKey;

use crate::error::CryptoError;
use crate::hash::blake2b_512_multi;
use crate::keys::expand;

/// Sign `message`. `public_key` must be the key derived from `private_key`.
pub fn sign_message(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    message: &[u8],
) -> Result<Signature, CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;
    let expanded = expand(private_key);
    let signature = raw_sign::<Blake2b512>(&expanded, message, &verifying_key);
    Ok(Signature(signature.to_bytes()))
}

/// Verify `signature` over `message` under `public_key`.
pub fn verify_signature(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    let sig = signature.as_bytes();
    let mut r_bytes = [0u8; 32];
    let mut s_bytes = [0u8; 32];
    r_bytes.copy_from_slice(&sig[..32]);
    s_bytes.copy_from_slice(&sig[32..]);

    let Some(s) = Option::<Scalar>::from(Scalar::from_canonical_bytes(s_bytes)) else {
        return false;
    };
    let Some(a) = CompressedEdwardsY(*public_key.as_bytes()).decompress() else {
        return false;
    };
    let Some(r) = CompressedEdwardsY(r_bytes).decompress() else {
        return false;
    };

    let k = Scalar::from_bytes_mod_order_wide(&blake2b_512_multi(&[
        &r_bytes,
        public_key.as_bytes(),
        message,
    ]));
    let check_r = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &(-a), &s);
    (r - check_r).mul_by_cofactor().is_identity()
}
