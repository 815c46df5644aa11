//! Validated value types shared by the adapter.

mod endpoint;
mod ids;
mod permission;

pub use endpoint::Endpoint;
pub use ids::{CollectionId, DatabaseId, DocumentId};
pub use permission::{Permission, Role};
