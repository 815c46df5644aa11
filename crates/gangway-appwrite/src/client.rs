//! HTTP client for the backend REST API.

use std::sync::RwLock;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, trace};

use gangway_core::error::{Error, ServiceError, TransportError};
use gangway_core::types::Endpoint;

use crate::endpoints::ErrorResponse;

const PROJECT_HEADER: &str = "x-appwrite-project";
const KEY_HEADER: &str = "x-appwrite-key";
const SESSION_HEADER: &str = "x-appwrite-session";

/// HTTP client for one backend project.
///
/// Owns header construction (project id, optional API key, optional
/// installed session secret) and uniform error-response parsing. Share one
/// client between the data and auth providers so that a session created by
/// `login` authenticates subsequent document calls.
#[derive(Debug)]
pub struct AppwriteClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    project_id: String,
    key: Option<String>,
    session_secret: RwLock<Option<String>>,
}

impl AppwriteClient {
    /// Create a new client for the given endpoint and project.
    pub fn new(endpoint: Endpoint, project_id: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gangway/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint,
            project_id: project_id.into(),
            key: None,
            session_secret: RwLock::new(None),
        }
    }

    /// Attach an API key (server-side authentication).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Returns the endpoint this client is configured for.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Install a session secret; subsequent requests authenticate as that
    /// session. Written only by the auth provider.
    pub(crate) fn set_session_secret(&self, secret: String) {
        *self.session_secret.write().unwrap() = Some(secret);
    }

    /// Remove the installed session secret.
    pub(crate) fn clear_session_secret(&self) {
        *self.session_secret.write().unwrap() = None;
    }

    /// Make a GET request.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub(crate) async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint.api_url(path);
        debug!(path, "GET");

        let response = self
            .http
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint))]
    pub(crate) async fn get_with_query<Q, R>(&self, path: &str, query: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.endpoint.api_url(path);
        debug!(path, "GET");
        trace!(?query, "query parameters");

        let response = self
            .http
            .get(&url)
            .query(query)
            .headers(self.headers())
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body), fields(endpoint = %self.endpoint))]
    pub(crate) async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.endpoint.api_url(path);
        debug!(path, "POST");

        let response = self
            .http
            .post(&url)
            .json(body)
            .headers(self.headers())
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a PATCH request with a JSON body.
    #[instrument(skip(self, body), fields(endpoint = %self.endpoint))]
    pub(crate) async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.endpoint.api_url(path);
        debug!(path, "PATCH");

        let response = self
            .http
            .patch(&url)
            .json(body)
            .headers(self.headers())
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// Make a DELETE request, discarding any response body.
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.endpoint.api_url(path);
        debug!(path, "DELETE");

        let response = self
            .http
            .delete(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Service(self.parse_error_response(response).await))
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            PROJECT_HEADER,
            HeaderValue::from_str(&self.project_id).expect("invalid project id characters"),
        );
        if let Some(ref key) = self.key {
            headers.insert(
                KEY_HEADER,
                HeaderValue::from_str(key).expect("invalid API key characters"),
            );
        }
        if let Some(ref secret) = *self.session_secret.read().unwrap() {
            if let Ok(value) = HeaderValue::from_str(secret) {
                headers.insert(SESSION_HEADER, value);
            }
        }
        headers
    }

    /// Handle a response, parsing the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport)?;
            Ok(body)
        } else {
            Err(Error::Service(self.parse_error_response(response).await))
        }
    }

    /// Parse an error response body, falling back to the bare status.
    async fn parse_error_response(&self, response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => ServiceError::new(status, body.kind, body.message),
            Err(_) => ServiceError::new(status, None, None),
        }
    }
}

/// Map a reqwest error into the transport taxonomy.
fn transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
