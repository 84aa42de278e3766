//! Fuzz target for categorizing arbitrary action text.
//!
//! Every built-in jurisdiction, hooks included, must categorize any UTF-8
//! input without panicking.

#![no_main]

use bt_core::CategorizerRegistry;
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static REGISTRY: Lazy<CategorizerRegistry> =
    Lazy::new(|| CategorizerRegistry::builtin().expect("built-in tables compile"));

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for (id, _) in REGISTRY.jurisdictions() {
        let _ = REGISTRY.categorize(id, text);
    }
});
