#![no_main]

//! Data loader fuzzer.
//!
//! Arbitrary text must either be rejected with a `ConfigError` or produce
//! data that starts a session.

use libfuzzer_sys::fuzz_target;
use zimp::game::{Session, SessionConfig};
use zimp::GameData;

fuzz_target!(|text: &str| {
    if let Ok(data) = text.parse::<GameData>() {
        assert!(Session::new(data, SessionConfig::default()).is_ok());
    }
});
