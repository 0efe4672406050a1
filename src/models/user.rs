//! User document.

use serde::{Deserialize, Serialize};

use crate::models::document::{merge_present_fields, Document};

/// A user record. No field is required; absent fields stay unset.
///
/// `phone` is a double like every other numeric field: the store applies
/// no typing stricter than "number", so fractional input is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Document for User {
    const NAME: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn merge(&mut self, patch: Self) {
        merge_present_fields!(self, patch, { phone, username });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deserialize_with_absent_fields() {
        let user: User = serde_json::from_str("{}").unwrap();
        assert_eq!(user, User::default());
    }

    #[test]
    fn test_merge_partial_patch_keeps_other_fields() {
        let mut user: User =
            serde_json::from_value(serde_json::json!({"phone": 5551234, "username": "a"})).unwrap();
        let patch: User = serde_json::from_value(serde_json::json!({"username": "b"})).unwrap();

        user.merge(patch);

        assert_eq!(user.phone, Some(5551234.0));
        assert_eq!(user.username.as_deref(), Some("b"));
    }

    #[test]
    fn test_phone_accepts_fractional_numbers() {
        let user: User = serde_json::from_value(serde_json::json!({"phone": 555.1234})).unwrap();
        assert_eq!(user.phone, Some(555.1234));
    }

    #[test]
    fn test_merge_empty_patch_is_identity() {
        let mut user = User {
            phone: Some(5551234.0),
            username: Some("a".to_string()),
        };
        let before = user.clone();
        user.merge(User::default());
        assert_eq!(user, before);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let user = User {
            phone: None,
            username: Some("a".to_string()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"username": "a"}));
    }

    proptest! {
        // Shallow-merge law: each field ends up as patch.field when present,
        // otherwise as the original value.
        #[test]
        fn prop_merge_field_wise(
            phone in proptest::option::of(-1e12..1e12f64),
            username in proptest::option::of("[a-z]{0,8}"),
            patch_phone in proptest::option::of(-1e12..1e12f64),
            patch_username in proptest::option::of("[a-z]{0,8}"),
        ) {
            let mut user = User { phone, username: username.clone() };
            let patch = User { phone: patch_phone, username: patch_username.clone() };
            user.merge(patch);

            prop_assert_eq!(user.phone, patch_phone.or(phone));
            prop_assert_eq!(user.username, patch_username.or(username));
        }
    }
}
