//! Framework-facing record representation and document reshaping.

use serde::ser::SerializeMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, InvalidInputError};

/// Backend metadata fields that must never leak into a record.
const STRIPPED_FIELDS: [&str; 3] = ["$permissions", "$databaseId", "$collectionId"];

/// The backend's internal id field, renamed to `id` on reshape.
pub const INTERNAL_ID_FIELD: &str = "$id";

/// A framework-facing record: a unique string `id` plus the document's
/// remaining fields.
///
/// Records are built fresh from backend documents on every read and are
/// never mutated in place. The reshape drops the backend-private metadata
/// fields (`$permissions`, `$databaseId`, `$collectionId`) and renames
/// `$id` to `id`; everything else passes through untouched, including
/// `$createdAt`/`$updatedAt`.
///
/// # Example
///
/// ```
/// use gangway_core::Record;
/// use serde_json::json;
///
/// let record = Record::from_document(json!({
///     "$id": "42",
///     "$permissions": ["read(\"any\")"],
///     "$databaseId": "admin",
///     "$collectionId": "customers",
///     "name": "x",
/// })).unwrap();
///
/// assert_eq!(record.id(), "42");
/// assert_eq!(record.get("name"), Some(&json!("x")));
/// assert!(record.get("$permissions").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    fields: Map<String, Value>,
}

impl Record {
    /// Reshape a backend document into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a JSON object or carries no
    /// internal id field.
    pub fn from_document(document: Value) -> Result<Self, Error> {
        let Value::Object(mut fields) = document else {
            return Err(InvalidInputError::Document {
                reason: "expected a JSON object".to_string(),
            }
            .into());
        };

        let id = match fields.remove(INTERNAL_ID_FIELD) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => {
                return Err(InvalidInputError::Document {
                    reason: format!("missing {} field", INTERNAL_ID_FIELD),
                }
                .into());
            }
        };

        for field in STRIPPED_FIELDS {
            fields.remove(field);
        }

        Ok(Self { id, fields })
    }

    /// Create a record carrying only an id, as returned by deletes.
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Returns the record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns one field value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the non-id fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Convert into a plain JSON object with an `id` key.
    pub fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String(self.id));
        map.extend(self.fields);
        Value::Object(map)
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
