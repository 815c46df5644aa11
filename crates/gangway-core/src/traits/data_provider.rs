//! Data provider trait: the 9-operation CRUD/list contract.

use async_trait::async_trait;
use serde_json::Value;
use serde::Serialize;

use crate::query::{Filters, Pagination, Sort};
use crate::record::Record;
use crate::types::{DocumentId, Permission};
use crate::Result;

/// Parameters for a list request.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Defaults to page 1, 10 per page when absent.
    pub pagination: Option<Pagination>,
    /// When absent, no sort expression is emitted and the backend's
    /// natural order applies.
    pub sort: Option<Sort>,
    pub filters: Filters,
}

/// Parameters for listing records that reference another record.
#[derive(Debug, Clone)]
pub struct ReferenceParams {
    /// The field on the listed resource holding the reference.
    pub target: String,
    /// The referenced record's id value.
    pub id: Value,
    pub pagination: Option<Pagination>,
    pub sort: Option<Sort>,
    pub filters: Filters,
}

/// A page of records plus the total match count.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub data: Vec<Record>,
    pub total: u64,
}

/// Per-write metadata: optional caller-supplied document id and
/// permission overrides. Absent permissions fall back to the provider's
/// configured defaults.
#[derive(Debug, Clone, Default)]
pub struct WriteMeta {
    pub document_id: Option<DocumentId>,
    pub read_permissions: Option<Vec<Permission>>,
    pub write_permissions: Option<Vec<Permission>>,
}

/// The CRUD/list contract consumed by admin frameworks.
///
/// Implementations are stateless translations: every call re-fetches from
/// the backend, errors propagate unchanged, and multi-id operations run
/// their per-id calls concurrently with all-or-first-error semantics.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// List records with pagination, sorting and filtering.
    async fn get_list(&self, resource: &str, params: ListParams) -> Result<ListOutput>;

    /// Fetch a single record by id. Fails with the backend's not-found
    /// error if the document does not exist.
    async fn get_one(&self, resource: &str, id: &DocumentId) -> Result<Record>;

    /// Fetch several records by id, concurrently. If any fetch fails the
    /// whole call fails; no partial result is returned.
    async fn get_many(&self, resource: &str, ids: &[DocumentId]) -> Result<Vec<Record>>;

    /// List records whose `target` field equals the given id.
    async fn get_many_reference(
        &self,
        resource: &str,
        params: ReferenceParams,
    ) -> Result<ListOutput>;

    /// Create a record.
    async fn create(&self, resource: &str, data: Value, meta: WriteMeta) -> Result<Record>;

    /// Update a record.
    async fn update(
        &self,
        resource: &str,
        id: &DocumentId,
        data: Value,
        meta: WriteMeta,
    ) -> Result<Record>;

    /// Apply one update payload to several records, concurrently. Fails
    /// as a whole on the first error.
    async fn update_many(
        &self,
        resource: &str,
        ids: &[DocumentId],
        data: Value,
        meta: WriteMeta,
    ) -> Result<Vec<Record>>;

    /// Delete a record; returns the deleted id wrapped as a record.
    async fn delete(&self, resource: &str, id: &DocumentId) -> Result<Record>;

    /// Delete several records, concurrently; returns all ids wrapped as
    /// records.
    async fn delete_many(&self, resource: &str, ids: &[DocumentId]) -> Result<Vec<Record>>;
}
