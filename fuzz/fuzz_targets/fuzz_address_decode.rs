#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Anything that decodes must encode back to the same body.
    if let Ok(public_key) = atto_crypto::decode_address(text) {
        let prefix_len = text.len() - 60;
        let encoded = atto_crypto::encode_address(&public_key, &text[..prefix_len]);
        assert_eq!(encoded, text);
    }
});
