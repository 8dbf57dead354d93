use crate::error::AuthError;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Claims extracted from a verified bearer token.
///
/// A claims set lives for a single request; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    /// The `sub` claim
    pub subject: Option<String>,
    /// The `permissions` claim, `None` when the token carries no such claim
    pub permissions: Option<BTreeSet<String>>,
    /// Every other claim of the token, untouched
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Creates a claims set that carries the given permissions
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: Some(permissions.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Builds a claims set from a decoded token payload.
    ///
    /// A `null` permissions claim counts as absent. When
    /// `require_permissions` is set an absent claim is rejected here instead
    /// of being left for the permission check.
    pub(crate) fn from_payload(
        mut payload: Map<String, Value>,
        require_permissions: bool,
    ) -> Result<Self, AuthError> {
        let subject = match payload.remove("sub") {
            None | Some(Value::Null) => None,
            Some(Value::String(subject)) => Some(subject),
            Some(_) => {
                return Err(AuthError::InvalidClaims(
                    "Subject claim must be a string.".to_string(),
                ));
            }
        };

        let permissions = match payload.remove("permissions") {
            None | Some(Value::Null) if require_permissions => {
                return Err(AuthError::InvalidClaims(
                    "Permissions not included in JWT.".to_string(),
                ));
            }
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(permission) => Ok(permission),
                        _ => Err(AuthError::InvalidClaims(
                            "Permissions claim must only contain strings.".to_string(),
                        )),
                    })
                    .collect::<Result<BTreeSet<_>, _>>()?,
            ),
            Some(_) => {
                return Err(AuthError::InvalidClaims(
                    "Permissions claim must be a list.".to_string(),
                ));
            }
        };

        Ok(Self {
            subject,
            permissions,
            extra: payload,
        })
    }

    /// Whether the permissions claim is present and contains `permission`
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|permissions| permissions.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_extracts_subject_and_permissions() {
        let claims = Claims::from_payload(
            payload(json!({
                "sub": "auth0|barista",
                "permissions": ["get:drinks-detail", "post:drinks"],
                "aud": "drink",
            })),
            false,
        )
        .unwrap();

        assert_eq!(claims.subject.as_deref(), Some("auth0|barista"));
        assert!(claims.has_permission("post:drinks"));
        assert!(!claims.has_permission("delete:drinks"));
        assert_eq!(claims.extra.get("aud"), Some(&json!("drink")));
        assert!(!claims.extra.contains_key("permissions"));
    }

    #[test]
    fn test_absent_permissions_are_kept_as_none() {
        let claims = Claims::from_payload(payload(json!({"sub": "x"})), false).unwrap();
        assert_eq!(claims.permissions, None);

        let claims =
            Claims::from_payload(payload(json!({"permissions": null})), false).unwrap();
        assert_eq!(claims.permissions, None);
    }

    #[test]
    fn test_empty_permissions_are_not_absent() {
        let claims = Claims::from_payload(payload(json!({"permissions": []})), false).unwrap();
        assert_eq!(claims.permissions, Some(BTreeSet::new()));
    }

    #[test]
    fn test_required_permissions_claim() {
        let err = Claims::from_payload(payload(json!({"sub": "x"})), true).unwrap_err();
        assert!(matches!(err, AuthError::InvalidClaims(_)));
    }

    #[test]
    fn test_permissions_must_be_a_list_of_strings() {
        let err = Claims::from_payload(payload(json!({"permissions": "post:drinks"})), false)
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::InvalidClaims("Permissions claim must be a list.".to_string())
        );

        let err = Claims::from_payload(payload(json!({"permissions": ["a", 1]})), false)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidClaims(_)));
    }

    #[test]
    fn test_subject_must_be_a_string() {
        let err = Claims::from_payload(payload(json!({"sub": 42})), false).unwrap_err();
        assert!(matches!(err, AuthError::InvalidClaims(_)));
    }
}
