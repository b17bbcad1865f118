//! Authenticated identity flag.
//!
//! Two states: anonymous and authenticated. `login` and `logout` are the
//! only transitions. Credential checks happen before `login` is called and
//! are not this type's concern.

use serde::{Deserialize, Serialize};

use crate::types::Email;

/// Display name and email of the signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub name: String,
    pub email: Email,
}

/// Current identity, if any.
///
/// Serializes as `{"user": ..., "isAuthenticated": ...}`; the flag is
/// always derived from `user` on the way back in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthRecord", into = "AuthRecord")]
pub struct AuthFlag {
    user: Option<AuthIdentity>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthRecord {
    #[serde(default)]
    user: Option<AuthIdentity>,
    #[serde(default)]
    is_authenticated: bool,
}

impl From<AuthRecord> for AuthFlag {
    fn from(record: AuthRecord) -> Self {
        Self { user: record.user }
    }
}

impl From<AuthFlag> for AuthRecord {
    fn from(flag: AuthFlag) -> Self {
        Self {
            is_authenticated: flag.user.is_some(),
            user: flag.user,
        }
    }
}

impl AuthFlag {
    /// Anonymous flag.
    #[must_use]
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Record `identity` as signed in, replacing any previous identity.
    pub fn login(&mut self, identity: AuthIdentity) {
        self.user = Some(identity);
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&AuthIdentity> {
        self.user.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn demo() -> AuthIdentity {
        AuthIdentity {
            name: "Demo User".to_owned(),
            email: Email::parse("user@example.com").unwrap(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let flag = AuthFlag::new();
        assert!(!flag.is_authenticated());
        assert!(flag.identity().is_none());
    }

    #[test]
    fn test_login_logout_transitions() {
        let mut flag = AuthFlag::new();
        flag.login(demo());
        assert!(flag.is_authenticated());
        assert_eq!(flag.identity().unwrap().name, "Demo User");

        flag.logout();
        assert!(!flag.is_authenticated());

        flag.logout();
        assert!(!flag.is_authenticated());
    }

    #[test]
    fn test_record_shape() {
        let mut flag = AuthFlag::new();
        flag.login(demo());

        let value = serde_json::to_value(&flag).unwrap();
        assert_eq!(value["isAuthenticated"], serde_json::json!(true));
        assert_eq!(value["user"]["email"], serde_json::json!("user@example.com"));

        let restored: AuthFlag = serde_json::from_value(value).unwrap();
        assert_eq!(restored, flag);
    }

    #[test]
    fn test_flag_derived_from_user_on_restore() {
        let restored: AuthFlag =
            serde_json::from_str(r#"{"user": null, "isAuthenticated": true}"#).unwrap();
        assert!(!restored.is_authenticated());
    }
}
