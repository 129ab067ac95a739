#![no_main]

use atto_blocks::{Block, BlockKind, JsonBlock};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = serde_json::from_slice::<JsonBlock>(data) else {
        return;
    };
    // Parsing must never panic; a parsed block must hash and re-serialise.
    if let Ok(block) = Block::from_json(BlockKind::Send, &json) {
        let _ = block.hash();
        let _ = block.verify_signature();
        let again = Block::from_json(BlockKind::Send, &block.to_json());
        assert!(again.is_ok());
    }
});
