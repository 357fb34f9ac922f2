#![no_main]

use libfuzzer_sys::fuzz_target;
use pihole::api::parse_session_cookie;

fuzz_target!(|data: &str| {
    if let Ok(value) = parse_session_cookie(data) {
        // The value is never empty and carries no cookie attributes
        assert!(!value.is_empty());
        assert!(!value.contains(';'));
        assert_eq!(value, value.trim());
        assert!(data.contains('='));
    }
});
