//! Attribute map decoding helpers.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use dropvault_core::error::AppError;

/// Extracts a required string attribute from an item.
///
/// A missing or non-string attribute means the stored record does not
/// match the expected shape and is reported as a serialization error.
pub fn require_s(item: &HashMap<String, AttributeValue>, attr: &str) -> Result<String, AppError> {
    match item.get(attr) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        _ => Err(AppError::serialization(format!(
            "Malformed record: missing string attribute '{attr}'"
        ))),
    }
}

/// Extracts an optional string attribute from an item.
pub fn optional_s(item: &HashMap<String, AttributeValue>, attr: &str) -> Option<String> {
    match item.get(attr) {
        Some(AttributeValue::S(value)) => Some(value.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_s_rejects_missing_attribute() {
        let item = HashMap::new();
        let err = require_s(&item, "fileName").unwrap_err();
        assert_eq!(err.kind, dropvault_core::ErrorKind::Serialization);
    }

    #[test]
    fn require_s_rejects_wrong_type() {
        let mut item = HashMap::new();
        item.insert("fileName".to_string(), AttributeValue::N("42".to_string()));
        assert!(require_s(&item, "fileName").is_err());
    }

    #[test]
    fn optional_s_tolerates_absence() {
        let item = HashMap::new();
        assert_eq!(optional_s(&item, "userId"), None);
    }
}
