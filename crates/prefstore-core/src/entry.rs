//! Entry rules: what keys and values a namespace may hold.

use serde::{Deserialize, Serialize};

use crate::error::EntryError;

/// Maximum key length, in characters.
pub const MAX_KEY_LENGTH: usize = 80;

/// Maximum value length, in characters.
pub const MAX_VALUE_LENGTH: usize = 8 * 1024;

/// A single key/value pair within one namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub key: String,
    pub value: String,
}

impl Entry {
    /// Build a validated entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self, EntryError> {
        let key = key.into();
        let value = value.into();
        validate_key(&key)?;
        validate_value(&value)?;
        Ok(Self { key, value })
    }
}

/// Check a key against the entry rules.
pub fn validate_key(key: &str) -> Result<(), EntryError> {
    if key.is_empty() {
        return Err(EntryError::EmptyKey);
    }
    let len = key.chars().count();
    if len > MAX_KEY_LENGTH {
        return Err(EntryError::KeyTooLong {
            len,
            max: MAX_KEY_LENGTH,
        });
    }
    if key.contains('\0') {
        return Err(EntryError::ContainsNul("key"));
    }
    Ok(())
}

/// Check a value against the entry rules. Empty values are allowed.
pub fn validate_value(value: &str) -> Result<(), EntryError> {
    let len = value.chars().count();
    if len > MAX_VALUE_LENGTH {
        return Err(EntryError::ValueTooLong {
            len,
            max: MAX_VALUE_LENGTH,
        });
    }
    if value.contains('\0') {
        return Err(EntryError::ContainsNul("value"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rules() {
        assert_eq!(validate_key(""), Err(EntryError::EmptyKey));
        assert!(validate_key("sample-key").is_ok());
        assert!(validate_key(&"k".repeat(MAX_KEY_LENGTH)).is_ok());
        assert_eq!(
            validate_key(&"k".repeat(MAX_KEY_LENGTH + 1)),
            Err(EntryError::KeyTooLong { len: 81, max: 80 })
        );
        assert_eq!(validate_key("a\0b"), Err(EntryError::ContainsNul("key")));
    }

    #[test]
    fn test_key_length_counts_chars() {
        // 80 multi-byte characters is still within the limit.
        assert!(validate_key(&"é".repeat(MAX_KEY_LENGTH)).is_ok());
    }

    #[test]
    fn test_value_rules() {
        assert!(validate_value("").is_ok());
        assert!(validate_value("  padded  ").is_ok());
        assert!(validate_value(&"v".repeat(MAX_VALUE_LENGTH)).is_ok());
        assert!(matches!(
            validate_value(&"v".repeat(MAX_VALUE_LENGTH + 1)),
            Err(EntryError::ValueTooLong { .. })
        ));
        assert_eq!(validate_value("\0"), Err(EntryError::ContainsNul("value")));
    }

    #[test]
    fn test_entry_new() {
        let entry = Entry::new("sample-key", "sample-val").unwrap();
        assert_eq!(entry.key, "sample-key");
        assert_eq!(entry.value, "sample-val");
        assert!(Entry::new("", "v").is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            EntryError::KeyTooLong { len: 81, max: 80 }.to_string(),
            "key is 81 characters long, maximum is 80"
        );
    }
}
