//! Auth provider trait.

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::identity::Identity;
use crate::Result;

/// The authentication contract consumed by admin frameworks.
///
/// Three externally observable states: anonymous, authenticated with a
/// live session, and authenticated from a persisted snapshot only (the
/// session handle is never persisted, so it is lost on restart).
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Create a session, fetch the identity, persist the snapshot and
    /// cache the session handle. Fails with an authentication error if the
    /// backend rejects the credentials.
    async fn login(&self, credentials: Credentials) -> Result<()>;

    /// Remove the persisted snapshot unconditionally, then delete the
    /// cached session if one exists. A 401 from the delete (session
    /// already invalid) is swallowed; any other failure propagates.
    async fn logout(&self) -> Result<()>;

    /// Succeeds iff a persisted snapshot exists. Does not validate the
    /// snapshot against the backend.
    async fn check_auth(&self) -> Result<()>;

    /// Inspect a backend error. A 401/403 clears the snapshot and fails,
    /// signalling the caller to force a logout; anything else succeeds
    /// with no action.
    async fn check_error(&self, error: &Error) -> Result<()>;

    /// Return the persisted snapshot if present, otherwise fetch the
    /// identity from the backend.
    async fn get_identity(&self) -> Result<Identity>;
}
