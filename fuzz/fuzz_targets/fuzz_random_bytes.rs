#![no_main]

use libfuzzer_sys::fuzz_target;
use startup_data::{check, load, SchemaKind};
use std::io::Write;
use tempfile::Builder;

fuzz_target!(|data: &[u8]| {
    // Loading needs a .json extension or it stops at the extension check
    if let Ok(mut temp_file) = Builder::new().suffix(".json").tempfile() {
        if temp_file.write_all(data).is_ok() {
            // Loading should never panic, only return an error
            if let Ok(document) = load(temp_file.path()) {
                assert_eq!(document.total_items, document.items.len());
            }
        }
    }

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = check(&value, SchemaKind::FullDocument);
        let _ = check(&value, SchemaKind::SingleItem);
    }
});
