//! Validated backend identifier types.
//!
//! Appwrite identifiers share one grammar: at most 36 characters from
//! `a-z A-Z 0-9 . - _`, and the first character may not be a special
//! character. `DocumentId` additionally knows the `unique()` sentinel,
//! which tells the backend to mint an identifier server-side.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The sentinel a create request carries when the backend should
/// generate the document id.
const UNIQUE_SENTINEL: &str = "unique()";

const MAX_ID_LEN: usize = 36;

fn check_key(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("cannot be empty".to_string());
    }
    if s.len() > MAX_ID_LEN {
        return Err(format!("exceeds maximum length of {} characters", MAX_ID_LEN));
    }
    let first = s.chars().next().unwrap();
    if first == '.' || first == '-' || first == '_' {
        return Err("cannot start with a special character".to_string());
    }
    for c in s.chars() {
        if !c.is_ascii_alphanumeric() && c != '.' && c != '-' && c != '_' {
            return Err(format!("contains invalid character '{}'", c));
        }
    }
    Ok(())
}

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $variant:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from a string, validating the format.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a valid identifier.
            pub fn new(s: impl Into<String>) -> Result<Self, Error> {
                let s = s.into();
                check_key(&s).map_err(|reason| InvalidInputError::$variant {
                    value: s.clone(),
                    reason,
                })?;
                Ok(Self(s))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

id_type! {
    /// A validated database identifier.
    DatabaseId, DatabaseId
}

id_type! {
    /// A validated collection identifier.
    CollectionId, CollectionId
}

id_type! {
    /// A validated document identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use gangway_core::DocumentId;
    ///
    /// let id = DocumentId::new("customer-42").unwrap();
    /// assert_eq!(id.as_str(), "customer-42");
    /// ```
    DocumentId, DocumentId
}

impl DocumentId {
    /// Returns the sentinel id that asks the backend to generate a
    /// unique document id on create.
    pub fn unique() -> Self {
        // Bypasses validation: the parentheses are part of the sentinel.
        Self(UNIQUE_SENTINEL.to_string())
    }

    /// Returns true if this is the server-side generation sentinel.
    pub fn is_unique_sentinel(&self) -> bool {
        self.0 == UNIQUE_SENTINEL
    }
}
