//! Backend endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated backend API endpoint URL.
///
/// Endpoints typically include the API version path, e.g.
/// `https://cloud.appwrite.io/v1` or `http://localhost/v1` for a local
/// instance. HTTP is accepted for self-hosted deployments, but HTTPS is
/// what you want anywhere credentials travel.
///
/// # Example
///
/// ```
/// use gangway_core::Endpoint;
///
/// let endpoint = Endpoint::new("https://cloud.appwrite.io/v1").unwrap();
/// assert_eq!(endpoint.api_url("account"),
///            "https://cloud.appwrite.io/v1/account");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Create a new endpoint from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute http(s) URL with a host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Endpoint {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for an API path under this endpoint.
    pub fn api_url(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme.
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::Endpoint {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Endpoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Endpoint::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_endpoint() {
        let endpoint = Endpoint::new("https://cloud.appwrite.io/v1").unwrap();
        assert_eq!(endpoint.host(), Some("cloud.appwrite.io"));
    }

    #[test]
    fn valid_http_endpoint() {
        let endpoint = Endpoint::new("http://localhost/v1").unwrap();
        assert_eq!(endpoint.scheme(), "http");
    }

    #[test]
    fn api_url_construction() {
        let endpoint = Endpoint::new("https://cloud.appwrite.io/v1").unwrap();
        assert_eq!(
            endpoint.api_url("databases/admin/collections/customers/documents"),
            "https://cloud.appwrite.io/v1/databases/admin/collections/customers/documents"
        );
    }

    #[test]
    fn api_url_handles_trailing_slash() {
        let endpoint = Endpoint::new("https://cloud.appwrite.io/v1/").unwrap();
        assert_eq!(
            endpoint.api_url("account"),
            "https://cloud.appwrite.io/v1/account"
        );
    }

    #[test]
    fn invalid_scheme() {
        assert!(Endpoint::new("ftp://cloud.appwrite.io").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(Endpoint::new("/v1/account").is_err());
    }
}
