//! Provisioning operations against the backend's server-side API.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use gangway_core::types::{CollectionId, DatabaseId, Permission};
use gangway_core::Result;

use crate::client::AppwriteClient;
use crate::endpoints::{
    attributes_path, collections_path, database_path, documents_path, CreateCollectionRequest,
    CreateDatabaseRequest, CreateDocumentRequest, CreateRelationshipAttributeRequest,
    CreateScalarAttributeRequest, CreateStringAttributeRequest, DATABASES,
};

/// Relationship cardinality between two collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationshipType {
    fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "oneToOne",
            Self::OneToMany => "oneToMany",
            Self::ManyToOne => "manyToOne",
            Self::ManyToMany => "manyToMany",
        }
    }
}

/// Provisioning client for databases, collections and attributes.
///
/// All calls require a client carrying an API key; session authentication
/// is not sufficient for the server-side API.
#[derive(Debug)]
pub struct AppwriteAdmin {
    client: Arc<AppwriteClient>,
}

impl AppwriteAdmin {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }

    /// Check whether a database exists.
    #[instrument(skip(self), fields(database = %database))]
    pub async fn database_exists(&self, database: &DatabaseId) -> Result<bool> {
        match self.client.get::<Value>(&database_path(database)).await {
            Ok(_) => Ok(true),
            Err(err) if err.status() == Some(404) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Create a database.
    #[instrument(skip(self), fields(database = %database))]
    pub async fn create_database(&self, database: &DatabaseId, name: &str) -> Result<()> {
        info!("Creating database");
        let request = CreateDatabaseRequest {
            database_id: database.as_str(),
            name,
        };
        self.client.post::<_, Value>(DATABASES, &request).await?;
        Ok(())
    }

    /// Delete a database and everything in it.
    #[instrument(skip(self), fields(database = %database))]
    pub async fn delete_database(&self, database: &DatabaseId) -> Result<()> {
        info!("Deleting database");
        self.client.delete(&database_path(database)).await
    }

    /// Create a collection.
    #[instrument(skip(self, permissions), fields(database = %database, collection = %collection))]
    pub async fn create_collection(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        name: &str,
        permissions: &[Permission],
    ) -> Result<()> {
        info!("Creating collection");
        let request = CreateCollectionRequest {
            collection_id: collection.as_str(),
            name,
            permissions,
        };
        self.client
            .post::<_, Value>(&collections_path(database), &request)
            .await?;
        Ok(())
    }

    /// Create a string attribute.
    #[instrument(skip(self), fields(collection = %collection, key))]
    pub async fn create_string_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        key: &str,
        size: u32,
        required: bool,
        array: bool,
    ) -> Result<()> {
        debug!("Creating string attribute");
        let request = CreateStringAttributeRequest {
            key,
            size,
            required,
            array,
        };
        let path = attributes_path(database, collection, "string");
        self.client.post::<_, Value>(&path, &request).await?;
        Ok(())
    }

    /// Create an integer attribute.
    pub async fn create_integer_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        key: &str,
        required: bool,
    ) -> Result<()> {
        self.create_scalar_attribute(database, collection, "integer", key, required)
            .await
    }

    /// Create a float attribute.
    pub async fn create_float_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        key: &str,
        required: bool,
    ) -> Result<()> {
        self.create_scalar_attribute(database, collection, "float", key, required)
            .await
    }

    /// Create a boolean attribute.
    pub async fn create_boolean_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        key: &str,
        required: bool,
    ) -> Result<()> {
        self.create_scalar_attribute(database, collection, "boolean", key, required)
            .await
    }

    /// Create a datetime attribute.
    pub async fn create_datetime_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        key: &str,
        required: bool,
    ) -> Result<()> {
        self.create_scalar_attribute(database, collection, "datetime", key, required)
            .await
    }

    /// Create a relationship attribute on `collection` pointing at
    /// `related`. Deleting the parent cascades into the children.
    #[instrument(skip(self), fields(collection = %collection, related = %related, key))]
    pub async fn create_relationship_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        related: &CollectionId,
        key: &str,
        relationship_type: RelationshipType,
    ) -> Result<()> {
        debug!("Creating relationship attribute");
        let request = CreateRelationshipAttributeRequest {
            related_collection_id: related.as_str(),
            relationship_type: relationship_type.as_str(),
            two_way: false,
            key,
            on_delete: "cascade",
        };
        let path = attributes_path(database, collection, "relationship");
        self.client.post::<_, Value>(&path, &request).await?;
        Ok(())
    }

    /// Create a document, bypassing the resource mapping. Pass `None` for
    /// a backend-generated id. Used when populating freshly provisioned
    /// collections.
    #[instrument(skip(self, data), fields(database = %database, collection = %collection))]
    pub async fn create_document(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        document_id: Option<&str>,
        data: &Value,
        permissions: &[Permission],
    ) -> Result<Value> {
        let request = CreateDocumentRequest {
            document_id: document_id.unwrap_or("unique()"),
            data,
            permissions,
        };
        self.client
            .post(&documents_path(database, collection), &request)
            .await
    }

    async fn create_scalar_attribute(
        &self,
        database: &DatabaseId,
        collection: &CollectionId,
        kind: &str,
        key: &str,
        required: bool,
    ) -> Result<()> {
        debug!(kind, key, "Creating attribute");
        let request = CreateScalarAttributeRequest {
            key,
            required,
            array: false,
        };
        let path = attributes_path(database, collection, kind);
        self.client.post::<_, Value>(&path, &request).await?;
        Ok(())
    }
}
