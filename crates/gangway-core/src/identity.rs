//! Identity snapshot type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// The serialized representation of the currently logged-in user.
///
/// Built from the backend's account object: `$id` becomes `id`, `name`
/// becomes `fullName`, and every other account field passes through in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,

    #[serde(rename = "fullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Identity {
    /// Build an identity from a backend account object.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not a JSON object or has no id.
    pub fn from_account(account: Value) -> Result<Self, Error> {
        let Value::Object(mut extra) = account else {
            return Err(InvalidInputError::Document {
                reason: "expected an account object".to_string(),
            }
            .into());
        };

        let id = match extra.remove("$id") {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => {
                return Err(InvalidInputError::Document {
                    reason: "account has no $id field".to_string(),
                }
                .into());
            }
        };

        let full_name = match extra.remove("name") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        Ok(Self {
            id,
            full_name,
            extra,
        })
    }
}
