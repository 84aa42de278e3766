//! Fuzz target for rule-table file parsing and compilation.
//!
//! Arbitrary JSON must parse, validate, and compile without panicking; bad
//! input only ever produces an error. Tables that compile are exercised on
//! their own patterns.

#![no_main]

use bt_config::RuleTableFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(file) = RuleTableFile::from_json(json) else {
        return;
    };
    if let Ok(table) = file.compile() {
        for rule in file.rules.iter().take(8) {
            for pattern in rule.patterns.iter().take(4) {
                let _ = table.categorize(pattern);
            }
        }
    }
});
