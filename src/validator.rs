//! Syntactic address checks.
//!
//! The pattern is deliberately permissive: it accepts anything shaped like
//! `local@label.rest` over the usual address character set, and leaves the
//! question of whether a mailbox actually exists to the SMTP probe.

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9-.]+$")
        .expect("address pattern failed to compile; this is a bug")
});

/// Returns `true` when `address` matches the permissive address pattern.
///
/// Pure and infallible; empty and non-matching strings return `false`.
pub fn is_valid_format(address: &str) -> bool {
    ADDRESS_PATTERN.is_match(address)
}

/// The domain portion of `address`, split at the first `@`.
pub fn domain_part(address: &str) -> Option<&str> {
    address.split_once('@').map(|(_, domain)| domain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_basic_address() {
        assert!(is_valid_format("alice@example.com"));
    }

    #[test]
    fn accepts_plus_tags_and_dots() {
        assert!(is_valid_format("first.last+tag@mail-host.example.co.uk"));
    }

    #[test]
    fn rejects_missing_at() {
        assert!(!is_valid_format("not-an-email"));
    }

    #[test]
    fn rejects_missing_domain_dot() {
        assert!(!is_valid_format("user@localhost"));
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("   "));
        assert!(!is_valid_format(" alice@example.com"));
    }

    #[test]
    fn domain_part_splits_at_first_at() {
        assert_eq!(domain_part("alice@example.com"), Some("example.com"));
        assert_eq!(domain_part("no-at-sign"), None);
    }

    proptest! {
        #[test]
        fn well_formed_addresses_match(
            local in "[A-Za-z0-9_+-]{1,16}",
            label in "[A-Za-z0-9]{1,12}",
            tld in "[A-Za-z]{2,8}",
        ) {
            let addr = format!("{}@{}.{}", local, label, tld);
            prop_assert!(is_valid_format(&addr));
        }

        #[test]
        fn strings_without_at_never_match(input in "[A-Za-z0-9_.+-]{0,32}") {
            prop_assert!(!is_valid_format(&input));
        }
    }
}
