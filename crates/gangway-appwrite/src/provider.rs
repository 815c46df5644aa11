//! Appwrite-backed data provider.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use gangway_core::error::InvalidInputError;
use gangway_core::types::{CollectionId, DatabaseId, DocumentId, Permission, Role};
use gangway_core::{
    DataProvider, ListOutput, ListParams, Record, ReferenceParams, ResourceMap, Result, WriteMeta,
};

use crate::client::AppwriteClient;
use crate::endpoints::{
    document_path, documents_path, CreateDocumentRequest, DocumentListResponse,
    UpdateDocumentRequest,
};
use crate::queries::QueryExpression;
use crate::translate::{filter_queries, pagination_queries, sort_queries};

/// The Appwrite-backed implementation of the CRUD/list contract.
///
/// Stateless beyond its configuration: each call resolves the collection,
/// builds query expressions, issues the backend call and reshapes the
/// returned documents. Errors propagate unchanged.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use gangway_core::{CollectionId, DatabaseId, Endpoint, ResourceMap};
/// use gangway_appwrite::{AppwriteClient, AppwriteDataProvider};
///
/// # fn example() -> gangway_core::Result<()> {
/// let client = Arc::new(AppwriteClient::new(
///     Endpoint::new("https://cloud.appwrite.io/v1")?,
///     "my-project",
/// ));
/// let provider = AppwriteDataProvider::new(
///     client,
///     DatabaseId::new("admin")?,
///     ResourceMap::new().with("customers", CollectionId::new("customers")?),
/// );
/// # let _ = provider;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AppwriteDataProvider {
    client: Arc<AppwriteClient>,
    database_id: DatabaseId,
    resources: ResourceMap,
    default_read: Vec<Permission>,
    default_write: Vec<Permission>,
}

impl AppwriteDataProvider {
    /// Create a provider with default permissions of `read("any")` and
    /// `write("any")`.
    pub fn new(
        client: Arc<AppwriteClient>,
        database_id: DatabaseId,
        resources: ResourceMap,
    ) -> Self {
        Self {
            client,
            database_id,
            resources,
            default_read: vec![Permission::read(Role::Any)],
            default_write: vec![Permission::write(Role::Any)],
        }
    }

    /// Replace the default read permissions applied to writes.
    pub fn with_default_read_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.default_read = permissions;
        self
    }

    /// Replace the default write permissions applied to writes.
    pub fn with_default_write_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.default_write = permissions;
        self
    }

    fn collection(&self, resource: &str) -> Result<&CollectionId> {
        self.resources.collection_id(resource)
    }

    /// Read permissions followed by write permissions, with meta overrides
    /// taking precedence over the configured defaults.
    fn merged_permissions(&self, meta: &WriteMeta) -> Vec<Permission> {
        let read = meta
            .read_permissions
            .as_deref()
            .unwrap_or(&self.default_read);
        let write = meta
            .write_permissions
            .as_deref()
            .unwrap_or(&self.default_write);
        read.iter().chain(write.iter()).cloned().collect()
    }

    async fn list_documents(
        &self,
        collection: &CollectionId,
        queries: Vec<QueryExpression>,
    ) -> Result<ListOutput> {
        let path = documents_path(&self.database_id, collection);
        let query: Vec<(&str, &str)> = queries
            .iter()
            .map(|q| ("queries[]", q.as_str()))
            .collect();

        let response: DocumentListResponse = self.client.get_with_query(&path, &query).await?;

        let data = response
            .documents
            .into_iter()
            .map(Record::from_document)
            .collect::<Result<Vec<_>>>()?;

        Ok(ListOutput {
            data,
            total: response.total,
        })
    }
}

#[async_trait]
impl DataProvider for AppwriteDataProvider {
    #[instrument(skip(self, params))]
    async fn get_list(&self, resource: &str, params: ListParams) -> Result<ListOutput> {
        debug!("Listing documents");
        let collection = self.collection(resource)?;

        // Pagination and sort first so the backend prioritizes windowing
        // regardless of filter count.
        let pagination = params.pagination.unwrap_or_default();
        let mut queries = pagination_queries(&pagination)?;
        if let Some(ref sort) = params.sort {
            queries.extend(sort_queries(sort));
        }
        queries.extend(filter_queries(&params.filters)?);

        self.list_documents(collection, queries).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_one(&self, resource: &str, id: &DocumentId) -> Result<Record> {
        debug!("Getting document");
        let collection = self.collection(resource)?;
        let path = document_path(&self.database_id, collection, id);

        let document: Value = self.client.get(&path).await?;
        Record::from_document(document)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn get_many(&self, resource: &str, ids: &[DocumentId]) -> Result<Vec<Record>> {
        debug!("Getting documents");
        let collection = self.collection(resource)?;

        let fetches = ids.iter().map(|id| {
            let path = document_path(&self.database_id, collection, id);
            async move { self.client.get::<Value>(&path).await }
        });

        let documents = try_join_all(fetches).await?;
        documents.into_iter().map(Record::from_document).collect()
    }

    #[instrument(skip(self, params), fields(target = %params.target))]
    async fn get_many_reference(
        &self,
        resource: &str,
        params: ReferenceParams,
    ) -> Result<ListOutput> {
        debug!("Listing referencing documents");
        let collection = self.collection(resource)?;

        // Filters, then the target equality, then the window, then sort.
        let mut queries = filter_queries(&params.filters)?;
        queries.push(QueryExpression::equal(&params.target, params.id.clone()));
        let pagination = params.pagination.unwrap_or_default();
        queries.extend(pagination_queries(&pagination)?);
        if let Some(ref sort) = params.sort {
            queries.extend(sort_queries(sort));
        }

        self.list_documents(collection, queries).await
    }

    #[instrument(skip(self, data, meta))]
    async fn create(&self, resource: &str, data: Value, meta: WriteMeta) -> Result<Record> {
        debug!("Creating document");
        let collection = self.collection(resource)?;
        let path = documents_path(&self.database_id, collection);

        let document_id = meta
            .document_id
            .clone()
            .unwrap_or_else(DocumentId::unique);
        let permissions = self.merged_permissions(&meta);

        let request = CreateDocumentRequest {
            document_id: document_id.as_str(),
            data: &data,
            permissions: &permissions,
        };

        let document: Value = self.client.post(&path, &request).await?;
        Record::from_document(document)
    }

    #[instrument(skip(self, data, meta), fields(id = %id))]
    async fn update(
        &self,
        resource: &str,
        id: &DocumentId,
        data: Value,
        meta: WriteMeta,
    ) -> Result<Record> {
        debug!("Updating document");
        let collection = self.collection(resource)?;
        let path = document_path(&self.database_id, collection, id);

        // An `id` in the payload targets the backend's internal id field;
        // it must not also be submitted as a plain attribute.
        let mut payload = into_object(data)?;
        if let Some(id_value) = payload.remove("id") {
            payload.insert("$id".to_string(), id_value);
        }

        let permissions = self.merged_permissions(&meta);
        let request = UpdateDocumentRequest {
            data: &Value::Object(payload),
            permissions: &permissions,
        };

        let document: Value = self.client.patch(&path, &request).await?;
        Record::from_document(document)
    }

    #[instrument(skip(self, ids, data, meta), fields(count = ids.len()))]
    async fn update_many(
        &self,
        resource: &str,
        ids: &[DocumentId],
        data: Value,
        meta: WriteMeta,
    ) -> Result<Vec<Record>> {
        debug!("Updating documents");
        let collection = self.collection(resource)?;
        let permissions = self.merged_permissions(&meta);

        // Fail the whole batch on the first error; no partial results.
        let updates = ids.iter().map(|id| {
            let path = document_path(&self.database_id, collection, id);
            let request = UpdateDocumentRequest {
                data: &data,
                permissions: &permissions,
            };
            async move { self.client.patch::<_, Value>(&path, &request).await }
        });

        let documents = try_join_all(updates).await?;
        documents.into_iter().map(Record::from_document).collect()
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, resource: &str, id: &DocumentId) -> Result<Record> {
        debug!("Deleting document");
        let collection = self.collection(resource)?;
        let path = document_path(&self.database_id, collection, id);

        self.client.delete(&path).await?;
        Ok(Record::id_only(id.as_str()))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn delete_many(&self, resource: &str, ids: &[DocumentId]) -> Result<Vec<Record>> {
        debug!("Deleting documents");
        let collection = self.collection(resource)?;

        let deletes = ids.iter().map(|id| {
            let path = document_path(&self.database_id, collection, id);
            async move { self.client.delete(&path).await }
        });

        try_join_all(deletes).await?;
        Ok(ids.iter().map(|id| Record::id_only(id.as_str())).collect())
    }
}

fn into_object(data: Value) -> Result<Map<String, Value>> {
    match data {
        Value::Object(map) => Ok(map),
        _ => Err(InvalidInputError::Other {
            message: "update data must be a JSON object".to_string(),
        }
        .into()),
    }
}
