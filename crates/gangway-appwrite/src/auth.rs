//! Appwrite-backed auth provider.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument};

use gangway_core::error::AuthError;
use gangway_core::{AuthProvider, Credentials, Error, Identity, IdentityStore, Result};

use crate::client::AppwriteClient;
use crate::endpoints::{session_path, CreateSessionRequest, SessionResponse, ACCOUNT, EMAIL_SESSION};

/// A cached session handle: set on login, cleared on logout, lost on
/// process restart. Never persisted.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    secret: String,
}

impl SessionHandle {
    /// Returns the backend session id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the session secret. Never log or display this value.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// Intentionally hide the session secret in Debug output
impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The Appwrite-backed implementation of the auth contract.
///
/// Owns exactly two pieces of state: the in-memory session handle and the
/// injected [`IdentityStore`] holding the persisted snapshot. Both are
/// written only by `login`, `logout` and `check_error`. The session
/// secret is also installed on the shared client so document calls made
/// through it are authenticated.
pub struct AppwriteAuthProvider<S> {
    client: Arc<AppwriteClient>,
    store: S,
    session: RwLock<Option<SessionHandle>>,
}

impl<S: IdentityStore> AppwriteAuthProvider<S> {
    /// Create an auth provider over a shared client and a snapshot store.
    pub fn new(client: Arc<AppwriteClient>, store: S) -> Self {
        Self {
            client,
            store,
            session: RwLock::new(None),
        }
    }

    /// Returns the cached session handle, if any.
    pub fn session(&self) -> Option<SessionHandle> {
        self.session.read().unwrap().clone()
    }
}

#[async_trait]
impl<S: IdentityStore> AuthProvider for AppwriteAuthProvider<S> {
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn login(&self, credentials: Credentials) -> Result<()> {
        info!("Creating session");

        let request = CreateSessionRequest {
            email: credentials.email(),
            password: credentials.password(),
        };

        let session: SessionResponse = match self.client.post(EMAIL_SESSION, &request).await {
            Ok(session) => session,
            Err(err) if err.status() == Some(401) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        self.client.set_session_secret(session.secret.clone());

        let account: Value = self.client.get(ACCOUNT).await?;
        let identity = Identity::from_account(account)?;
        self.store.save(&identity)?;

        *self.session.write().unwrap() = Some(SessionHandle {
            id: session.id,
            secret: session.secret,
        });

        debug!(user = %identity.id, "Session created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        info!("Logging out");

        // The snapshot goes unconditionally, whatever happens to the
        // session below.
        self.store.clear()?;

        let handle = self.session.write().unwrap().take();
        let Some(handle) = handle else {
            return Ok(());
        };

        let result = self.client.delete(&session_path(handle.id())).await;
        self.client.clear_session_secret();

        match result {
            Ok(()) => Ok(()),
            Err(err) if err.status() == Some(401) => {
                // Session already invalid on the backend; nothing to undo.
                debug!("Session delete returned 401, ignoring");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    async fn check_auth(&self) -> Result<()> {
        if self.store.load()?.is_some() {
            Ok(())
        } else {
            Err(AuthError::NotAuthenticated.into())
        }
    }

    async fn check_error(&self, error: &Error) -> Result<()> {
        match error.status() {
            Some(401) | Some(403) => {
                debug!("Backend rejected the session, clearing snapshot");
                self.store.clear()?;
                Err(AuthError::SessionExpired.into())
            }
            _ => Ok(()),
        }
    }

    #[instrument(skip(self))]
    async fn get_identity(&self) -> Result<Identity> {
        if let Some(identity) = self.store.load()? {
            return Ok(identity);
        }

        debug!("No snapshot, fetching account");
        let account: Value = self.client.get(ACCOUNT).await?;
        Identity::from_account(account)
    }
}

impl<S> std::fmt::Debug for AppwriteAuthProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteAuthProvider")
            .field("endpoint", self.client.endpoint())
            .field("session", &self.session.read().unwrap().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gangway_core::error::ServiceError;
    use gangway_core::{Endpoint, MemoryIdentityStore};
    use serde_json::json;

    fn provider() -> AppwriteAuthProvider<MemoryIdentityStore> {
        let endpoint = Endpoint::new("https://cloud.appwrite.io/v1").unwrap();
        let client = Arc::new(AppwriteClient::new(endpoint, "project-1"));
        AppwriteAuthProvider::new(client, MemoryIdentityStore::new())
    }

    fn identity() -> Identity {
        Identity::from_account(json!({"$id": "user-1", "name": "Jane"})).unwrap()
    }

    #[tokio::test]
    async fn check_auth_requires_a_snapshot() {
        let provider = provider();
        assert!(provider.check_auth().await.is_err());

        provider.store.save(&identity()).unwrap();
        assert!(provider.check_auth().await.is_ok());
    }

    #[tokio::test]
    async fn check_error_clears_snapshot_on_forbidden() {
        let provider = provider();
        provider.store.save(&identity()).unwrap();

        let err: Error = ServiceError::new(403, None, None).into();
        assert!(provider.check_error(&err).await.is_err());
        assert!(provider.store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn check_error_ignores_other_statuses() {
        let provider = provider();
        provider.store.save(&identity()).unwrap();

        let err: Error = ServiceError::new(500, None, None).into();
        assert!(provider.check_error(&err).await.is_ok());
        assert!(provider.store.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn logout_without_session_just_clears_snapshot() {
        let provider = provider();
        provider.store.save(&identity()).unwrap();

        provider.logout().await.unwrap();
        assert!(provider.store.load().unwrap().is_none());
    }

    #[test]
    fn session_handle_hides_secret_in_debug() {
        let handle = SessionHandle {
            id: "sess-1".to_string(),
            secret: "topsecret".to_string(),
        };
        let debug = format!("{:?}", handle);
        assert!(debug.contains("sess-1"));
        assert!(!debug.contains("topsecret"));
        assert_eq!(handle.secret(), "topsecret");
    }
}
