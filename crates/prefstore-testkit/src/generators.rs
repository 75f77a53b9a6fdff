//! Proptest generators for property-based testing.

use proptest::prelude::*;

use prefstore_core::{Namespace, MAX_KEY_LENGTH};

/// Generate valid namespace segments (1 to 4 of them).
pub fn namespace_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_-]{0,15}", 1..=4)
}

/// Generate a valid namespace.
pub fn namespace() -> impl Strategy<Value = Namespace> {
    namespace_segments().prop_map(|segments| {
        Namespace::new(segments).expect("generated segments are valid")
    })
}

/// Generate two different namespaces.
pub fn distinct_namespaces() -> impl Strategy<Value = (Namespace, Namespace)> {
    (namespace(), namespace()).prop_filter("namespaces must differ", |(a, b)| a != b)
}

/// Generate a valid key, including non-ASCII and whitespace.
pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9.-]{0,31}",
        "[^\\x00]{1,80}",
    ]
    .prop_filter("key within limit", |k| {
        !k.is_empty() && k.chars().count() <= MAX_KEY_LENGTH
    })
}

/// Generate a valid value, including the empty string.
pub fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ -~]{0,64}",
        "[^\\x00]{0,256}",
    ]
}

/// Generate a small map of entries.
pub fn entries() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key(), value()), 0..8)
}
