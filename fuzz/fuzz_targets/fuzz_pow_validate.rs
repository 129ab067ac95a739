#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 32 bytes of subject, 8 of nonce, optionally 8 of threshold.
    if data.len() < 40 {
        return;
    }
    let mut subject = [0u8; 32];
    subject.copy_from_slice(&data[..32]);
    let mut nonce = [0u8; 8];
    nonce.copy_from_slice(&data[32..40]);
    let nonce = u64::from_le_bytes(nonce);

    let threshold = match data.get(40..48) {
        Some(bytes) => {
            let mut threshold = [0u8; 8];
            threshold.copy_from_slice(bytes);
            u64::from_le_bytes(threshold)
        }
        None => atto_work::WorkThresholds::DEFAULT,
    };

    let value = atto_work::work_value(&subject, nonce);
    assert_eq!(
        atto_work::validate_work(&subject, nonce, threshold),
        value >= threshold
    );
});
