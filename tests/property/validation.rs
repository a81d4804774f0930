//! Property-based tests for the field rules

use agentcard::agent::{validate_field, FieldKind, InvalidReason};
use proptest::prelude::*;

fn any_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

proptest! {
    /// Any digit or symbol makes a field invalid, and the first one is reported.
    #[test]
    fn test_digit_or_symbol_is_invalid(
        kind in any_kind(),
        prefix in "[a-zA-Z ]{0,8}",
        bad in "[0-9!@#$%^&*()_+=.,;:?/-]",
        suffix in "[a-zA-Z ]{0,8}",
    ) {
        let text = format!("{}{}{}", prefix, bad, suffix);
        let status = validate_field(kind, &text);
        prop_assert!(!status.valid);
        let expected = bad.chars().next().unwrap();
        prop_assert_eq!(
            status.reason,
            Some(InvalidReason::InvalidCharacter { ch: expected, position: prefix.chars().count() })
        );
    }

    /// Short letter-and-space text is valid for every field.
    #[test]
    fn test_letters_within_limit_are_valid(kind in any_kind(), text in "[a-zA-Z][a-zA-Z ]{0,18}") {
        prop_assert!(validate_field(kind, &text).valid);
    }

    /// Validation is a pure function of its input.
    #[test]
    fn test_validation_is_deterministic(kind in any_kind(), text in any::<String>()) {
        prop_assert_eq!(validate_field(kind, &text), validate_field(kind, &text));
    }
}
