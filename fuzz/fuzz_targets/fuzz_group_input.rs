#![no_main]

//! Fuzz testing for group name validation and domain type decoding.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pihole::types::{is_valid_group_name, DomainKind};

#[derive(Debug, Arbitrary)]
struct Input {
    name: String,
    domain_type: i64,
}

fuzz_target!(|input: Input| {
    if is_valid_group_name(&input.name) {
        let trimmed = input.name.trim();
        assert!(!trimmed.is_empty());
        assert!(!trimmed.chars().any(char::is_whitespace));
    }

    match DomainKind::from_code(input.domain_type) {
        Some((kind, wildcard)) => {
            assert!((0..=3).contains(&input.domain_type));
            assert_eq!(wildcard, input.domain_type >= 2);
            assert_eq!(kind.as_str().parse::<DomainKind>().ok(), Some(kind));
        }
        None => assert!(!(0..=3).contains(&input.domain_type)),
    }
});
