use proptest::prelude::*;

use atto_work::{validate_work, work_value, WorkGenerator, WorkNonce};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Generated PoW always passes its own validation.
    #[test]
    fn generated_pow_always_valid(
        subject in prop::array::uniform32(0u8..),
        threshold in 0u64..0xff00_0000_0000_0000,
        workers in 1usize..5,
    ) {
        let nonce = WorkGenerator::with_workers(workers).generate(&subject, threshold).unwrap();
        prop_assert!(
            validate_work(&subject, nonce.0, threshold),
            "generated nonce must pass validation"
        );
    }
}

proptest! {
    /// Zero threshold always passes regardless of nonce.
    #[test]
    fn zero_threshold_always_passes(
        subject in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
    ) {
        prop_assert!(validate_work(&subject, nonce, 0));
    }

    /// Lower threshold is easier to meet: if valid at T, then valid at T-1.
    #[test]
    fn lower_threshold_is_easier(
        subject in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        threshold in 1u64..u64::MAX,
    ) {
        if validate_work(&subject, nonce, threshold) {
            prop_assert!(validate_work(&subject, nonce, threshold - 1));
        }
    }

    /// Validation is exactly a comparison against the work value.
    #[test]
    fn validation_matches_work_value(
        subject in prop::array::uniform32(0u8..),
        nonce in any::<u64>(),
        threshold in any::<u64>(),
    ) {
        prop_assert_eq!(validate_work(&subject, nonce, threshold), work_value(&subject, nonce) >= threshold);
    }

    /// Nonce text round trip.
    #[test]
    fn nonce_text_roundtrip(nonce in any::<u64>()) {
        let text = WorkNonce(nonce).to_string();
        prop_assert_eq!(text.len(), 16);
        prop_assert_eq!(text.parse::<WorkNonce>().unwrap(), WorkNonce(nonce));
    }
}
