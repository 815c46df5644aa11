//! Resource-to-collection mapping.

use std::collections::HashMap;

use crate::error::{Error, InvalidInputError};
use crate::types::CollectionId;

/// A fixed mapping from logical resource names (e.g. `customers`) to
/// backend collection identifiers. Supplied at construction and immutable
/// for the adapter's lifetime.
///
/// # Example
///
/// ```
/// use gangway_core::{CollectionId, ResourceMap};
///
/// let map = ResourceMap::new()
///     .with("customers", CollectionId::new("customers").unwrap());
/// assert!(map.collection_id("customers").is_ok());
/// assert!(map.collection_id("unknown").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    map: HashMap<String, CollectionId>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource, builder style.
    pub fn with(mut self, resource: impl Into<String>, collection: CollectionId) -> Self {
        self.map.insert(resource.into(), collection);
        self
    }

    /// Resolve the collection id for a resource name.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not registered.
    pub fn collection_id(&self, resource: &str) -> Result<&CollectionId, Error> {
        self.map
            .get(resource)
            .ok_or_else(|| {
                InvalidInputError::UnknownResource {
                    resource: resource.to_string(),
                }
                .into()
            })
    }

    /// Iterate over registered resource names.
    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
