//! Fuzz target for rule name classification and query construction.
//!
//! Goal: classification must be total and exception queries must quote any name.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_names
//! ```

#![no_main]

use confgate_domain::rules::{RuleKind, classify, exception_query, rule_query};
use libfuzzer_sys::fuzz_target;

const REPORTED_PREFIXES: [&str; 3] = ["deny", "violation", "warn"];

fuzz_target!(|data: &[u8]| {
    if let Ok(name) = std::str::from_utf8(data) {
        let kind = classify(name);
        if kind != RuleKind::Neutral {
            assert!(REPORTED_PREFIXES.iter().any(|p| name.starts_with(p)));
        }
        let query = exception_query("main", name);
        assert!(query.starts_with("data.main.exception[_][_] == \""));
        assert!(query.ends_with('"'));
        let _ = rule_query("main", name);
    }
});
