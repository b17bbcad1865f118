//! Auth state container.

use std::sync::Arc;

use game_store_core::{AuthFlag, AuthIdentity};
use tokio::sync::watch;

use super::PersistedState;
use crate::storage::{AUTH_KEY, StateStore};

/// Shared handle to the signed-in identity.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<PersistedState<AuthFlag>>,
}

impl AuthStore {
    /// Open the auth flag, restoring any persisted identity from `storage`.
    #[must_use]
    pub fn open(storage: Arc<dyn StateStore>) -> Self {
        Self {
            inner: Arc::new(PersistedState::open(storage, AUTH_KEY)),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthFlag {
        self.inner.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthFlag> {
        self.inner.subscribe()
    }

    pub fn login(&self, identity: AuthIdentity) -> AuthFlag {
        tracing::info!(email = %identity.email, "Shopper logged in");
        self.inner.mutate(|flag| flag.login(identity))
    }

    pub fn logout(&self) -> AuthFlag {
        tracing::info!("Shopper logged out");
        self.inner.mutate(AuthFlag::logout)
    }

    #[must_use]
    pub fn identity(&self) -> Option<AuthIdentity> {
        self.inner.state.borrow().identity().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use game_store_core::Email;

    use super::*;
    use crate::storage::MemoryStore;

    fn identity() -> AuthIdentity {
        AuthIdentity {
            name: "Demo User".to_owned(),
            email: Email::parse("user@example.com").unwrap(),
        }
    }

    #[test]
    fn test_starts_anonymous() {
        let store = AuthStore::open(Arc::new(MemoryStore::new()));
        assert!(!store.is_authenticated());
        assert!(store.identity().is_none());
    }

    #[test]
    fn test_login_survives_reopen() {
        let storage = Arc::new(MemoryStore::new());
        let store = AuthStore::open(storage.clone());
        store.login(identity());

        let reopened = AuthStore::open(storage);
        assert!(reopened.is_authenticated());
        assert_eq!(reopened.identity(), Some(identity()));
    }

    #[test]
    fn test_logout_survives_reopen() {
        let storage = Arc::new(MemoryStore::new());
        let store = AuthStore::open(storage.clone());
        store.login(identity());
        let flag = store.logout();
        assert!(!flag.is_authenticated());

        let reopened = AuthStore::open(storage);
        assert!(!reopened.is_authenticated());
    }
}
