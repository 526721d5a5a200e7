use crate::{
    error::{Result, TaskpadError},
    storage::KeyValueStore,
};
use std::sync::Arc;
use tracing::info;

/// Local account and login flag
///
/// A single email/password pair is stored; logging in compares both by exact
/// string match.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    pub const NAMESPACE: &'static str = "LoginPrefs";
    pub const EMAIL_KEY: &'static str = "email";
    pub const PASSWORD_KEY: &'static str = "password";
    pub const LOGGED_IN_KEY: &'static str = "isLoggedIn";

    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stores the account, replacing any previous one, and logs it in
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        self.store.put(Self::NAMESPACE, Self::EMAIL_KEY, email).await?;
        self.store
            .put(Self::NAMESPACE, Self::PASSWORD_KEY, password)
            .await?;
        self.set_logged_in(true).await
    }

    /// Logs in when both values match the stored account
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        if email.is_empty() || password.is_empty() {
            return Err(TaskpadError::InvalidCredentials);
        }

        let stored_email = self.store.get(Self::NAMESPACE, Self::EMAIL_KEY).await?;
        let stored_password = self.store.get(Self::NAMESPACE, Self::PASSWORD_KEY).await?;

        match (stored_email, stored_password) {
            (Some(e), Some(p)) if e == email && p == password => self.set_logged_in(true).await,
            _ => {
                info!("Login rejected");
                Err(TaskpadError::InvalidCredentials)
            }
        }
    }

    /// Clears the login flag; the account stays registered
    pub async fn logout(&self) -> Result<()> {
        self.set_logged_in(false).await
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        let flag = self.store.get(Self::NAMESPACE, Self::LOGGED_IN_KEY).await?;
        Ok(flag.as_deref() == Some("true"))
    }

    pub async fn is_registered(&self) -> Result<bool> {
        Ok(self
            .store
            .get(Self::NAMESPACE, Self::EMAIL_KEY)
            .await?
            .is_some())
    }

    async fn set_logged_in(&self, logged_in: bool) -> Result<()> {
        self.store
            .put(
                Self::NAMESPACE,
                Self::LOGGED_IN_KEY,
                if logged_in { "true" } else { "false" },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    fn memory_credentials() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_fresh_store_is_logged_out() {
        let creds = memory_credentials();
        assert!(!creds.is_logged_in().await.unwrap());
        assert!(!creds.is_registered().await.unwrap());
    }

    #[tokio::test]
    async fn test_register_logs_in() {
        let creds = memory_credentials();
        creds.register("me@example.com", "Secret#123").await.unwrap();

        assert!(creds.is_registered().await.unwrap());
        assert!(creds.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_requires_exact_match() {
        let creds = memory_credentials();
        creds.register("me@example.com", "Secret#123").await.unwrap();
        creds.logout().await.unwrap();

        assert!(creds.login("me@example.com", "secret#123").await.is_err());
        assert!(creds.login("ME@example.com", "Secret#123").await.is_err());
        assert!(!creds.is_logged_in().await.unwrap());

        creds.login("me@example.com", "Secret#123").await.unwrap();
        assert!(creds.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_login_without_account_fails() {
        let creds = memory_credentials();
        let result = creds.login("me@example.com", "Secret#123").await;
        assert!(matches!(result, Err(TaskpadError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_rejects_empty_input() {
        let creds = memory_credentials();
        creds.register("", "").await.unwrap();
        creds.logout().await.unwrap();

        assert!(creds.login("", "").await.is_err());
    }

    #[tokio::test]
    async fn test_login_state_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        CredentialStore::new(Arc::new(FileStorage::new(temp_dir.path())))
            .register("me@example.com", "Secret#123")
            .await
            .unwrap();

        let reopened = CredentialStore::new(Arc::new(FileStorage::new(temp_dir.path())));
        assert!(reopened.is_logged_in().await.unwrap());
        reopened.logout().await.unwrap();
        assert!(!reopened.is_logged_in().await.unwrap());
        assert!(reopened.is_registered().await.unwrap());
    }
}
