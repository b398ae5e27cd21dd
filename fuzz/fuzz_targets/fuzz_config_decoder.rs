//! Fuzz target for configuration decoding.
//!
//! Goal: decoding should **never panic** on any input, whatever the decoder.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_decoder
//! ```

#![no_main]

use confgate_domain::InputFormat;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for format in [InputFormat::Json, InputFormat::Yaml, InputFormat::Toml] {
            if let Ok(document) = confgate_inputs::parse_document("fuzz", text, format) {
                // Combined mode re-serializes every document.
                let _ = serde_json::to_string(&document.to_value());
            }
        }
    }
});
