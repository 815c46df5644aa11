//! API paths and request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gangway_core::types::{CollectionId, DatabaseId, DocumentId, Permission};

// ============================================================================
// Paths
// ============================================================================

/// GET: the authenticated account.
pub const ACCOUNT: &str = "account";

/// POST: create an email/password session.
pub const EMAIL_SESSION: &str = "account/sessions/email";

/// GET/POST: databases (admin API).
pub const DATABASES: &str = "databases";

/// DELETE: one session.
pub fn session_path(session_id: &str) -> String {
    format!("account/sessions/{}", session_id)
}

/// GET (list) / POST (create) documents in a collection.
pub fn documents_path(database: &DatabaseId, collection: &CollectionId) -> String {
    format!(
        "databases/{}/collections/{}/documents",
        database, collection
    )
}

/// GET/PATCH/DELETE one document.
pub fn document_path(
    database: &DatabaseId,
    collection: &CollectionId,
    document: &DocumentId,
) -> String {
    format!(
        "databases/{}/collections/{}/documents/{}",
        database, collection, document
    )
}

/// DELETE one database (admin API).
pub fn database_path(database: &DatabaseId) -> String {
    format!("databases/{}", database)
}

/// POST: create a collection (admin API).
pub fn collections_path(database: &DatabaseId) -> String {
    format!("databases/{}/collections", database)
}

/// POST: create a typed attribute (admin API). `kind` is one of
/// `string`, `integer`, `float`, `boolean`, `datetime`, `relationship`.
pub fn attributes_path(database: &DatabaseId, collection: &CollectionId, kind: &str) -> String {
    format!(
        "databases/{}/collections/{}/attributes/{}",
        database, collection, kind
    )
}

// ============================================================================
// Document API types
// ============================================================================

/// Response from listing documents.
#[derive(Debug, Deserialize)]
pub struct DocumentListResponse {
    pub total: u64,
    pub documents: Vec<Value>,
}

/// Request body for creating a document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest<'a> {
    pub document_id: &'a str,
    pub data: &'a Value,
    pub permissions: &'a [Permission],
}

/// Request body for updating a document.
#[derive(Debug, Serialize)]
pub struct UpdateDocumentRequest<'a> {
    pub data: &'a Value,
    pub permissions: &'a [Permission],
}

// ============================================================================
// Account API types
// ============================================================================

/// Request body for creating an email/password session.
#[derive(Debug, Serialize)]
pub struct CreateSessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response from creating a session. Only the fields this adapter needs;
/// the backend sends more.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "$id")]
    pub id: String,
    /// Session secret for the `X-Appwrite-Session` header. Empty when the
    /// deployment does not expose it.
    #[serde(default)]
    pub secret: String,
}

// ============================================================================
// Admin API types
// ============================================================================

/// Request body for creating a database.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDatabaseRequest<'a> {
    pub database_id: &'a str,
    pub name: &'a str,
}

/// Request body for creating a collection.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest<'a> {
    pub collection_id: &'a str,
    pub name: &'a str,
    pub permissions: &'a [Permission],
}

/// Request body for string attributes.
#[derive(Debug, Serialize)]
pub struct CreateStringAttributeRequest<'a> {
    pub key: &'a str,
    pub size: u32,
    pub required: bool,
    pub array: bool,
}

/// Request body for integer, float, boolean and datetime attributes.
#[derive(Debug, Serialize)]
pub struct CreateScalarAttributeRequest<'a> {
    pub key: &'a str,
    pub required: bool,
    pub array: bool,
}

/// Request body for relationship attributes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipAttributeRequest<'a> {
    pub related_collection_id: &'a str,
    #[serde(rename = "type")]
    pub relationship_type: &'a str,
    pub two_way: bool,
    pub key: &'a str,
    pub on_delete: &'a str,
}

// ============================================================================
// Errors
// ============================================================================

/// Backend error response format.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
