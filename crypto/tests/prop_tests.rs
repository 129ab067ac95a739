use proptest::prelude::*;

use atto_crypto::{
    decode_address, encode_address, keypair_from_seed, sign_message, verify_signature,
};
use atto_types::PublicKey;

proptest! {
    /// Any 32 bytes survive address encoding, under either prefix length.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform32(0u8..), legacy in any::<bool>()) {
        let key = PublicKey(bytes);
        let prefix = if legacy { "xrb_" } else { "nano_" };
        let address = encode_address(&key, prefix);
        prop_assert_eq!(address.len(), prefix.len() + 60);
        prop_assert_eq!(decode_address(&address).unwrap(), key);
    }

    /// Changing any single character of an address is detected.
    #[test]
    fn address_typo_detected(bytes in prop::array::uniform32(0u8..), pos in 5usize..65, c in "[13456789abcdefghijkmnopqrstuwxyz]") {
        let address = encode_address(&PublicKey(bytes), "nano_");
        let replacement = c.chars().next().unwrap();
        prop_assume!(address.as_bytes()[pos] as char != replacement);
        let mut typo = address.clone();
        typo.replace_range(pos..pos + 1, &c);
        prop_assert!(decode_address(&typo).is_err());
    }

    /// Signatures verify, and flipping any bit of the message breaks them.
    #[test]
    fn sign_verify_bit_flip(
        seed in prop::array::uniform32(0u8..),
        index in any::<u32>(),
        msg in prop::collection::vec(any::<u8>(), 1..128),
        flip in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let kp = keypair_from_seed(&seed, index).unwrap();
        let sig = sign_message(&kp.private, &kp.public, &msg).unwrap();
        prop_assert!(verify_signature(&kp.public, &msg, &sig));

        let mut tampered = msg.clone();
        let i = flip.index(tampered.len());
        tampered[i] ^= 1 << bit;
        prop_assert!(!verify_signature(&kp.public, &tampered, &sig));
    }

    /// Flipping any single bit of a signature breaks it.
    #[test]
    fn signature_bit_flip(
        seed in prop::array::uniform32(0u8..),
        msg in prop::collection::vec(any::<u8>(), 0..64),
        bit in 0usize..512,
    ) {
        let kp = keypair_from_seed(&seed, 0).unwrap();
        let mut sig = sign_message(&kp.private, &kp.public, &msg).unwrap();
        sig.0[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!verify_signature(&kp.public, &msg, &sig));
    }
}
