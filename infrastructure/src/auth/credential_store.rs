use application::{Authorizer, Credentials};
use async_trait::async_trait;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Username -> password pairs allowed to perform protected writes.
#[derive(Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<DashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(DashMap::new()),
        }
    }

    /// A store holding exactly one accepted pair.
    pub fn with_credential(username: impl Into<String>, password: impl Into<String>) -> Self {
        let store = Self::new();
        store.insert(username, password);
        store
    }

    /// Adds or replaces the password for `username`.
    pub fn insert(&self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials.insert(username.into(), password.into());
    }
}

impl fmt::Debug for InMemoryCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCredentialStore")
            .field("users", &self.credentials.len())
            .finish()
    }
}

#[async_trait]
impl Authorizer for InMemoryCredentialStore {
    #[instrument(skip(self))]
    async fn authorize(&self, credentials: &Credentials) -> bool {
        let accepted = self
            .credentials
            .get(&credentials.username)
            .is_some_and(|expected| *expected.value() == credentials.password);
        debug!(accepted, "Credential check finished");
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_only_the_exact_pair() {
        let store = InMemoryCredentialStore::with_credential("admin", "secret");
        assert!(store.authorize(&Credentials::new("admin", "secret")).await);
        assert!(!store.authorize(&Credentials::new("admin", "Secret")).await);
        assert!(!store.authorize(&Credentials::new("root", "secret")).await);
        assert!(!store.authorize(&Credentials::default()).await);
    }

    #[tokio::test]
    async fn inserted_pairs_are_accepted() {
        let store = InMemoryCredentialStore::new();
        assert!(!store.authorize(&Credentials::new("ops", "pw")).await);
        store.insert("ops", "pw");
        assert!(store.authorize(&Credentials::new("ops", "pw")).await);
    }
}
