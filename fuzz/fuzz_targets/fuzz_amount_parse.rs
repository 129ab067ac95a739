#![no_main]

use atto_types::Unit;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let unit = Unit::nano();
    // Whatever parses renders back to an amount that parses to the same raw.
    if let Ok(raw) = unit.decimal_to_raw(text) {
        let rendered = unit.raw_to_decimal(&raw);
        assert_eq!(unit.decimal_to_raw(&rendered).ok(), Some(raw));
    }
});
