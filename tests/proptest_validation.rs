//! Property-based tests using proptest
//!
//! These tests verify the project ID validation invariants used by
//! default-project resolution against randomized inputs.

use gcrm::config::validate_project_id;
use proptest::prelude::*;

/// Generate well-formed project IDs: a lowercase letter, then 5-29
/// lowercase letters, digits, or hyphens, not ending in a hyphen
fn arb_valid_project_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{4,28}[a-z0-9]"
}

proptest! {
    /// Every well-formed ID is accepted
    #[test]
    fn well_formed_ids_validate(id in arb_valid_project_id()) {
        prop_assert!(validate_project_id(&id), "rejected: {id}");
    }

    /// Anything outside the 6-30 length window is rejected
    #[test]
    fn out_of_range_lengths_rejected(id in "[a-z0-9-]{0,5}|[a-z][a-z0-9-]{30,40}") {
        prop_assert!(!validate_project_id(&id), "accepted: {id}");
    }

    /// IDs starting with a digit or hyphen are rejected
    #[test]
    fn bad_leading_character_rejected(id in "[0-9-][a-z0-9-]{5,20}") {
        prop_assert!(!validate_project_id(&id), "accepted: {id}");
    }

    /// A trailing hyphen is rejected even when everything else is fine
    #[test]
    fn trailing_hyphen_rejected(id in "[a-z][a-z0-9-]{4,20}") {
        let id = format!("{id}-");
        prop_assert!(!validate_project_id(&id), "accepted: {id}");
    }

    /// Uppercase or non-ASCII characters are rejected
    #[test]
    fn invalid_characters_rejected(
        prefix in "[a-z][a-z0-9-]{2,10}",
        bad in "[A-Z_.]",
        suffix in "[a-z0-9]{2,10}",
    ) {
        let id = format!("{prefix}{bad}{suffix}");
        prop_assert!(!validate_project_id(&id), "accepted: {id}");
    }

    /// Validation never panics, whatever the input
    #[test]
    fn never_panics(id in "\\PC{0,64}") {
        let _ = validate_project_id(&id);
    }
}
